use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Record at position {index} has a blank {field}")]
    BlankField { index: usize, field: &'static str },
    #[error("Duplicate record id: {0}")]
    DuplicateId(String),
    #[error("Record {id}: tier {tier} is outside 0..=5")]
    TierOutOfRange { id: String, tier: u8 },
    #[error("Record {id}: {hours}h of study is inconsistent with tier {tier}")]
    StudyHoursMismatch { id: String, tier: u8, hours: u32 },
    #[error("Record {id}: places must not be empty")]
    NoPlaces { id: String },
    #[error("Record {id}: overall score {score} must be a finite, non-negative number")]
    InvalidScore { id: String, score: f64 },

    #[error("Catalogue decode error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Catalogue read error: {0}")]
    Io(#[from] std::io::Error),
}
