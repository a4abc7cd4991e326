//! Range/set index over a record store
//!
//! Derives the selectable options for every filter dimension: the distinct
//! categorical values and the observed span of every numeric field.

use super::range::NumericRange;
use crate::catalog::Record;
use serde::Serialize;
use std::collections::BTreeSet;

/// Selectable options for every filter dimension
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterBounds {
    pub tiers: BTreeSet<u8>,
    pub families: BTreeSet<String>,
    pub places: BTreeSet<String>,
    pub score_bounds: NumericRange,
    pub hours_bounds: NumericRange,
    pub population_bounds: NumericRange,
}

impl FilterBounds {
    pub fn from_records(records: &[Record]) -> Self {
        let tiers = records.iter().map(|r| r.tier).collect();

        let families = records
            .iter()
            .map(|r| r.family.clone())
            .filter(|f| !f.trim().is_empty())
            .collect();

        let places = records
            .iter()
            .flat_map(|r| r.places.iter().cloned())
            .collect();

        Self {
            tiers,
            families,
            places,
            score_bounds: NumericRange::spanning(records.iter().map(|r| r.overall_score)),
            hours_bounds: NumericRange::spanning(records.iter().map(|r| f64::from(r.study_hours))),
            population_bounds: NumericRange::spanning(
                records.iter().map(|r| r.population_count as f64),
            ),
        }
    }
}
