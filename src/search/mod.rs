//! Free-text search over catalogue records
//!
//! Tiered field matching (exact, prefix, substring, edit distance) combined
//! into a weighted relevance score.

pub mod engine;
pub mod fuzzy;
pub mod parser;
pub mod ranking;

#[cfg(test)]
mod property_tests;

pub use engine::{SearchEngine, SearchResult, SearchSettings};
pub use fuzzy::{levenshtein, similarity, FuzzyMatcher, MatchTiers, MatchType};
pub use parser::{normalize_text, ParsedQuery, QueryParser};
pub use ranking::{Highlight, MatchScore, RecordScorer, ScoringWeights, SearchField};
