//! Error types and handling for the langfinder CLI

use crate::catalog::CatalogError;
use std::fmt;

/// Longest query the CLI accepts, in characters
pub const MAX_QUERY_CHARS: usize = 200;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    InvalidInput(String),
    InvalidCatalog(String),
    Config(String),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::InvalidCatalog(msg) => write!(f, "Invalid catalogue: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::InvalidCatalog(_) => "invalid_catalog",
            AppError::Config(_) => "config_error",
            AppError::NotFound(_) => "not_found",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidInput(_) | AppError::InvalidCatalog(_) | AppError::Config(_) => 1,
            AppError::NotFound(_) => 3,
            AppError::Internal(_) => 5,
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                AppError::NotFound(e.to_string())
            }
            CatalogError::Io(e) => AppError::Internal(e.to_string()),
            other => AppError::InvalidCatalog(other.to_string()),
        }
    }
}

/// Convert anyhow::Error to AppError, keeping a wrapped AppError intact
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<AppError>() {
            Ok(app) => app,
            Err(err) => match err.downcast::<CatalogError>() {
                Ok(catalog) => catalog.into(),
                Err(err) => match err.downcast_ref::<std::io::Error>() {
                    Some(io) if io.kind() == std::io::ErrorKind::NotFound => {
                        AppError::NotFound(format!("{:#}", err))
                    }
                    _ => AppError::Internal(format!("{:#}", err)),
                },
            },
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

/// Validation functions
pub fn validate_query(query: &str) -> Result<(), AppError> {
    if query.chars().count() > MAX_QUERY_CHARS {
        return Err(AppError::InvalidInput(format!(
            "Query too long, maximum {} characters",
            MAX_QUERY_CHARS
        )));
    }

    Ok(())
}

pub fn validate_limit(limit: usize) -> Result<(), AppError> {
    if limit == 0 {
        return Err(AppError::InvalidInput(
            "Limit must be at least 1".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::InvalidInput("x".into()).error_code(),
            "invalid_input"
        );
        assert_eq!(AppError::NotFound("x".into()).exit_code(), 3);
        assert_eq!(AppError::Internal("x".into()).exit_code(), 5);
        assert_eq!(
            AppError::Config("bad".into()).to_string(),
            "Configuration error: bad"
        );
    }

    #[test]
    fn test_catalog_error_conversion() {
        let err: AppError = CatalogError::DuplicateId("es".into()).into();
        assert!(matches!(err, AppError::InvalidCatalog(_)));

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AppError = CatalogError::Io(missing).into();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_anyhow_roundtrip_keeps_kind() {
        let wrapped = anyhow::Error::new(AppError::Config("weights".into()));
        assert!(matches!(AppError::from(wrapped), AppError::Config(_)));

        let result: anyhow::Result<()> =
            Err(CatalogError::DuplicateId("fr".into())).context("loading catalogue");
        let err = AppError::from(result.unwrap_err());
        assert!(matches!(err, AppError::InvalidCatalog(_)));

        let plain = anyhow::anyhow!("boom");
        assert!(matches!(AppError::from(plain), AppError::Internal(_)));
    }

    #[test]
    fn test_validate_query() {
        assert!(validate_query("").is_ok());
        assert!(validate_query("mandarin").is_ok());
        assert!(validate_query(&"a".repeat(MAX_QUERY_CHARS + 1)).is_err());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(3).is_ok());
    }
}
