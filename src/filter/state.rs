//! Filter state and the manager that owns it
//!
//! `FilterState` is a plain value. The only way to change one is through a
//! `FilterManager` setter, and every setter recomputes `is_active` before
//! returning, so the flag can never disagree with the dimensions.

use super::bounds::FilterBounds;
use super::range::NumericRange;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Every active filter and the free-text query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    tiers: BTreeSet<u8>,
    families: BTreeSet<String>,
    places: BTreeSet<String>,
    overall_score: NumericRange,
    study_hours: NumericRange,
    population: NumericRange,
    query: String,
    is_active: bool,
}

impl FilterState {
    /// State that constrains nothing against `bounds`
    pub fn unconstrained(bounds: &FilterBounds) -> Self {
        Self {
            tiers: BTreeSet::new(),
            families: BTreeSet::new(),
            places: BTreeSet::new(),
            overall_score: bounds.score_bounds,
            study_hours: bounds.hours_bounds,
            population: bounds.population_bounds,
            query: String::new(),
            is_active: false,
        }
    }

    pub fn tiers(&self) -> &BTreeSet<u8> {
        &self.tiers
    }

    pub fn families(&self) -> &BTreeSet<String> {
        &self.families
    }

    pub fn places(&self) -> &BTreeSet<String> {
        &self.places
    }

    pub fn overall_score_range(&self) -> NumericRange {
        self.overall_score
    }

    pub fn study_hours_range(&self) -> NumericRange {
        self.study_hours
    }

    pub fn population_range(&self) -> NumericRange {
        self.population
    }

    /// Raw query text as last set, untrimmed
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Query with surrounding whitespace removed; `None` when blank
    pub fn effective_query(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Whether any dimension differs from its value in
    /// `FilterState::unconstrained(defaults)`
    fn deviates_from(&self, defaults: &FilterBounds) -> bool {
        !self.tiers.is_empty()
            || !self.families.is_empty()
            || !self.places.is_empty()
            || self.overall_score != defaults.score_bounds
            || self.study_hours != defaults.hours_bounds
            || self.population != defaults.population_bounds
            || self.effective_query().is_some()
    }
}

/// Owns the current `FilterState` and the defaults it is measured against
#[derive(Debug, Clone)]
pub struct FilterManager {
    defaults: FilterBounds,
    state: FilterState,
}

impl FilterManager {
    pub fn new(defaults: FilterBounds) -> Self {
        let state = FilterState::unconstrained(&defaults);
        Self { defaults, state }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn set_tiers<I>(&mut self, tiers: I)
    where
        I: IntoIterator<Item = u8>,
    {
        self.state.tiers = tiers.into_iter().collect();
        self.refresh();
    }

    pub fn set_families<I, S>(&mut self, families: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.families = families.into_iter().map(Into::into).collect();
        self.refresh();
    }

    pub fn set_places<I, S>(&mut self, places: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.places = places.into_iter().map(Into::into).collect();
        self.refresh();
    }

    pub fn set_overall_score_range(&mut self, range: impl Into<NumericRange>) {
        self.state.overall_score = range.into();
        self.refresh();
    }

    pub fn set_study_hours_range(&mut self, range: impl Into<NumericRange>) {
        self.state.study_hours = range.into();
        self.refresh();
    }

    pub fn set_population_range(&mut self, range: impl Into<NumericRange>) {
        self.state.population = range.into();
        self.refresh();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
        self.refresh();
    }

    /// Restore every dimension to its default
    pub fn reset(&mut self) {
        self.state = FilterState::unconstrained(&self.defaults);
        self.refresh();
    }

    /// Swap in the bounds of a replacement catalogue.
    ///
    /// Ranges still at their old default follow the new one; every other
    /// range and all selections are kept as they are.
    pub fn rebind(&mut self, defaults: FilterBounds) {
        if self.state.overall_score == self.defaults.score_bounds {
            self.state.overall_score = defaults.score_bounds;
        }
        if self.state.study_hours == self.defaults.hours_bounds {
            self.state.study_hours = defaults.hours_bounds;
        }
        if self.state.population == self.defaults.population_bounds {
            self.state.population = defaults.population_bounds;
        }

        self.defaults = defaults;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.state.is_active = self.state.deviates_from(&self.defaults);
        debug!("Filter state updated, active={}", self.state.is_active);
    }
}
