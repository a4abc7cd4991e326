//! Catalogue session facade
//!
//! Binds one store snapshot to its filter bounds, the filter manager, the
//! search engine and the suggestion generator. Every mutation publishes the
//! new `FilterState` on a watch channel so a presentation layer can observe
//! it without polling.

use crate::catalog::{Record, RecordStore};
use crate::config::EngineConfig;
use crate::filter::{evaluate, FilterBounds, FilterManager, FilterState, NumericRange};
use crate::search::{SearchEngine, SearchResult};
use crate::suggest::{Suggestion, SuggestionGenerator};
use tokio::sync::watch;
use tracing::{debug, info};

/// What the presentation layer should show for the current state
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome<'a> {
    /// No query: the filtered records, in catalogue order
    Filtered(Vec<&'a Record>),
    /// A query is present: ranked hits among the filtered records
    Ranked(Vec<SearchResult>),
}

impl QueryOutcome<'_> {
    pub fn len(&self) -> usize {
        match self {
            QueryOutcome::Filtered(records) => records.len(),
            QueryOutcome::Ranked(results) => results.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Filter and search session over a single catalogue snapshot
pub struct CatalogEngine {
    store: RecordStore,
    bounds: FilterBounds,
    filters: FilterManager,
    search: SearchEngine,
    state_tx: watch::Sender<FilterState>,
}

impl CatalogEngine {
    pub fn new(store: RecordStore) -> Self {
        Self::with_config(store, &EngineConfig::default())
    }

    pub fn with_config(store: RecordStore, config: &EngineConfig) -> Self {
        let bounds = FilterBounds::from_records(store.records());
        let filters = FilterManager::new(bounds.clone());
        let (state_tx, _) = watch::channel(filters.state().clone());

        info!(
            "Catalogue session started with {} records (store v{})",
            store.len(),
            store.version()
        );

        Self {
            store,
            bounds,
            filters,
            search: config.search_engine(),
            state_tx,
        }
    }

    /// Every record of the bound snapshot
    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn filter_state(&self) -> &FilterState {
        self.filters.state()
    }

    pub fn filter_bounds(&self) -> &FilterBounds {
        &self.bounds
    }

    /// Receiver that sees every state change from now on
    pub fn subscribe(&self) -> watch::Receiver<FilterState> {
        self.state_tx.subscribe()
    }

    pub fn set_tiers<I>(&mut self, tiers: I)
    where
        I: IntoIterator<Item = u8>,
    {
        self.filters.set_tiers(tiers);
        self.publish();
    }

    pub fn set_families<I, S>(&mut self, families: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.set_families(families);
        self.publish();
    }

    pub fn set_places<I, S>(&mut self, places: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.set_places(places);
        self.publish();
    }

    pub fn set_overall_score_range(&mut self, range: impl Into<NumericRange>) {
        self.filters.set_overall_score_range(range);
        self.publish();
    }

    pub fn set_study_hours_range(&mut self, range: impl Into<NumericRange>) {
        self.filters.set_study_hours_range(range);
        self.publish();
    }

    pub fn set_population_range(&mut self, range: impl Into<NumericRange>) {
        self.filters.set_population_range(range);
        self.publish();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.set_query(query);
        self.publish();
    }

    pub fn reset(&mut self) {
        self.filters.reset();
        self.publish();
    }

    /// Records passing the categorical and range filters; the query is ignored
    pub fn filtered_records(&self) -> Vec<&Record> {
        evaluate(self.filters.state(), self.store.records())
    }

    /// Rank the filtered records against `query`; blank queries yield nothing
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let candidates = self.filtered_records();
        self.search.search(query, &candidates)
    }

    /// Filtered records when the stored query is blank, ranked hits otherwise
    pub fn apply_query(&self) -> QueryOutcome<'_> {
        match self.filters.state().effective_query() {
            Some(query) => QueryOutcome::Ranked(self.search(query)),
            None => QueryOutcome::Filtered(self.filtered_records()),
        }
    }

    /// Typeahead suggestions over the whole catalogue
    pub fn suggest(&self, partial: &str, max_results: usize) -> Vec<Suggestion> {
        SuggestionGenerator::suggest(partial, self.store.records(), max_results)
    }

    /// Bind a replacement snapshot and recompute the bounds
    pub fn replace_store(&mut self, store: RecordStore) {
        if store.same_snapshot(&self.store) {
            return;
        }

        debug!(
            "Replacing store v{} with v{}",
            self.store.version(),
            store.version()
        );
        self.bounds = FilterBounds::from_records(store.records());
        self.filters.rebind(self.bounds.clone());
        self.store = store;
        self.publish();
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.filters.state().clone());
    }
}
