//! Engine configuration
//!
//! Every tunable of the scorer, search limits, suggestion count and debounce
//! period. Stored as JSON; any missing key takes its default.

use crate::error::AppError;
use crate::search::{MatchTiers, ScoringWeights, SearchEngine, SearchSettings};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Suggestion defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestSettings {
    pub default_limit: usize,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self { default_limit: 8 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: ScoringWeights,
    pub scoring: MatchTiers,
    pub search: SearchSettings,
    pub suggest: SuggestSettings,
    pub debounce_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            scoring: MatchTiers::default(),
            search: SearchSettings::default(),
            suggest: SuggestSettings::default(),
            debounce_ms: 300,
        }
    }
}

impl EngineConfig {
    /// Reject settings the scorer cannot work with
    pub fn validate(&self) -> Result<(), AppError> {
        let weights = [
            ("weights.name", self.weights.name),
            ("weights.native_name", self.weights.native_name),
            ("weights.family", self.weights.family),
            ("weights.places", self.weights.places),
        ];
        for (key, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    key, value
                )));
            }
        }
        if weights.iter().all(|(_, value)| *value == 0.0) {
            return Err(AppError::Config(
                "At least one field weight must be positive".to_string(),
            ));
        }

        let unit = [
            ("scoring.prefix_score", self.scoring.prefix_score),
            ("scoring.substring_score", self.scoring.substring_score),
            ("scoring.fuzzy_cutoff", self.scoring.fuzzy_cutoff),
            ("scoring.fuzzy_scale", self.scoring.fuzzy_scale),
            ("search.min_score", self.search.min_score),
        ];
        for (key, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(AppError::Config(format!(
                    "{} must lie in [0, 1], got {}",
                    key, value
                )));
            }
        }

        if self.search.max_results == 0 {
            return Err(AppError::Config(
                "search.max_results must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Search engine built from these settings
    pub fn search_engine(&self) -> SearchEngine {
        SearchEngine::with_config(
            self.weights.clone(),
            self.scoring.clone(),
            self.search.clone(),
        )
    }
}

/// Default location of the configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
    Ok(config_dir.join("langfinder").join("config.json"))
}

/// Load configuration.
///
/// An explicit path must exist. Without one the default location is tried
/// and a missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match config_path() {
            Ok(p) => (p, false),
            Err(e) => {
                debug!("No config directory ({}), using defaults", e);
                return Ok(EngineConfig::default());
            }
        },
    };

    if !required && !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(EngineConfig::default());
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: EngineConfig = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    config.validate()?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}
