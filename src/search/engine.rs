//! Search Engine Integration
//!
//! Ties together query parsing, field matching, and ranking to turn a
//! candidate list into a thresholded, ordered result list.

use super::fuzzy::{FuzzyMatcher, MatchTiers};
use super::parser::QueryParser;
use super::ranking::{Highlight, RecordScorer, ScoringWeights, SearchField};
use crate::catalog::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::debug;

/// One ranked hit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub record: Record,
    /// Relevance in `[0, 1]`
    pub score: f64,
    pub matched_fields: BTreeSet<SearchField>,
    pub highlights: Vec<Highlight>,
}

/// Cut-off and size limits for a result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Results scoring below this are dropped
    pub min_score: f64,
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_score: 0.3,
            max_results: 50,
        }
    }
}

/// Search engine that combines parsing, matching, and ranking
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    scorer: RecordScorer,
    settings: SearchSettings,
}

impl SearchEngine {
    /// Create a new search engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a search engine with custom weights, tiers and limits
    pub fn with_config(weights: ScoringWeights, tiers: MatchTiers, settings: SearchSettings) -> Self {
        Self {
            scorer: RecordScorer::new(FuzzyMatcher::with_tiers(tiers), weights),
            settings,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Rank `candidates` against `query`.
    ///
    /// A blank query returns an empty list. Ties keep candidate order.
    pub fn search(&self, query: &str, candidates: &[&Record]) -> Vec<SearchResult> {
        let Some(parsed) = QueryParser::parse(query) else {
            return Vec::new();
        };

        let started = Instant::now();
        let mut results: Vec<SearchResult> = candidates
            .iter()
            .filter_map(|record| {
                let scored = self.scorer.score(&parsed, record);
                (scored.final_score >= self.settings.min_score).then(|| SearchResult {
                    record: (*record).clone(),
                    score: scored.final_score,
                    matched_fields: scored.matched_fields,
                    highlights: scored.highlights,
                })
            })
            .collect();

        // stable: equal scores stay in catalogue order
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(self.settings.max_results);

        debug!(
            "Query '{}' matched {}/{} candidates in {:?}",
            parsed.normalized,
            results.len(),
            candidates.len(),
            started.elapsed()
        );

        results
    }

    /// Convenience wrapper over an owned record slice
    pub fn search_records(&self, query: &str, records: &[Record]) -> Vec<SearchResult> {
        let candidates: Vec<&Record> = records.iter().collect();
        self.search(query, &candidates)
    }
}
