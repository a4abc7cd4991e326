//! Catalogue record type
//!
//! Mirrors the shape the data layer serves (camelCase JSON). Display metadata
//! is carried through untouched; the engine never reads it.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Highest difficulty tier
pub const MAX_TIER: u8 = 5;

/// One catalogue entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub native_name: String,
    /// Difficulty tier, 0 = reference/native
    pub tier: u8,
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub subfamily: String,
    pub places: Vec<String>,
    pub overall_score: f64,
    #[serde(default)]
    pub population_count: u64,
    #[serde(default)]
    pub study_hours: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph: Option<String>,
}

impl Record {
    /// Create a record with the canonical study hours for `tier` and
    /// every optional attribute left empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>, tier: u8) -> Self {
        let study_hours = study_hours_for_tier(tier)
            .map(|range| *range.start())
            .unwrap_or_default();

        Self {
            id: id.into(),
            name: name.into(),
            native_name: String::new(),
            tier,
            family: String::new(),
            subfamily: String::new(),
            places: Vec::new(),
            overall_score: 0.0,
            population_count: 0,
            study_hours,
            color: None,
            glyph: None,
        }
    }

    pub fn with_native_name(mut self, native_name: impl Into<String>) -> Self {
        self.native_name = native_name.into();
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    pub fn with_places<I, S>(mut self, places: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.places = places.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_overall_score(mut self, score: f64) -> Self {
        self.overall_score = score;
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population_count = population;
        self
    }

    pub fn with_study_hours(mut self, hours: u32) -> Self {
        self.study_hours = hours;
        self
    }

    /// Places joined into the single string the scorer matches against
    pub fn places_text(&self) -> String {
        self.places.join(", ")
    }
}

/// Study hours the data source publishes for each tier
pub fn study_hours_for_tier(tier: u8) -> Option<RangeInclusive<u32>> {
    match tier {
        0 => Some(0..=0),
        1 => Some(600..=750),
        2 => Some(900..=900),
        3 => Some(1100..=1100),
        4 => Some(1800..=1800),
        5 => Some(2200..=2200),
        _ => None,
    }
}
