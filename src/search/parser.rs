//! Query normalization
//!
//! Queries and the field text they are compared with go through the same
//! folding: Unicode NFKC, trimmed, lower-cased.

use unicode_normalization::UnicodeNormalization;

/// A query ready for scoring
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    /// Original unmodified query
    pub original: String,
    /// Folded form used for every comparison
    pub normalized: String,
}

impl ParsedQuery {
    /// Length of the normalized query in characters
    pub fn char_len(&self) -> usize {
        self.normalized.chars().count()
    }
}

/// Query parser and preprocessor
pub struct QueryParser;

impl QueryParser {
    /// Parse a raw query. Blank or whitespace-only input yields `None`.
    pub fn parse(query: &str) -> Option<ParsedQuery> {
        let normalized = normalize_text(query);
        if normalized.is_empty() {
            return None;
        }

        Some(ParsedQuery {
            original: query.to_string(),
            normalized,
        })
    }
}

/// Fold text for case-insensitive comparison
pub fn normalize_text(text: &str) -> String {
    text.nfkc().collect::<String>().trim().to_lowercase()
}
