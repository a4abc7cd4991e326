//! Categorical and numeric-range predicates
//!
//! AND across dimensions, OR within a multi-select. An empty selection does
//! not constrain. Output keeps catalogue order.

use super::state::FilterState;
use crate::catalog::Record;

/// Records satisfying every dimension of `state`, in input order
pub fn evaluate<'a>(state: &FilterState, records: &'a [Record]) -> Vec<&'a Record> {
    records.iter().filter(|r| matches(state, r)).collect()
}

/// Whether a single record passes every dimension
pub fn matches(state: &FilterState, record: &Record) -> bool {
    tier_matches(state, record)
        && family_matches(state, record)
        && place_matches(state, record)
        && state
            .overall_score_range()
            .contains(record.overall_score)
        && state
            .study_hours_range()
            .contains(f64::from(record.study_hours))
        && state
            .population_range()
            .contains(record.population_count as f64)
}

fn tier_matches(state: &FilterState, record: &Record) -> bool {
    state.tiers().is_empty() || state.tiers().contains(&record.tier)
}

fn family_matches(state: &FilterState, record: &Record) -> bool {
    state.families().is_empty() || state.families().contains(&record.family)
}

fn place_matches(state: &FilterState, record: &Record) -> bool {
    state.places().is_empty() || record.places.iter().any(|p| state.places().contains(p))
}
