//! Field-level matching
//!
//! Compares a normalized query with one normalized field through four tiers:
//! exact, prefix, substring, and finally Levenshtein similarity.

use serde::{Deserialize, Serialize};

/// Which tier produced a field match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Field equals the query
    Exact,
    /// Field starts with the query
    Prefix,
    /// Query appears inside the field
    Substring,
    /// Edit-distance similarity above the cut-off
    Approximate,
}

/// Score of one field against the query
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    /// Field score in `[0, 1]`
    pub score: f64,
    pub match_type: MatchType,
    /// Character span of the query inside the field, absent for approximate matches
    pub span: Option<(usize, usize)>,
}

/// Scores assigned to each tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchTiers {
    pub prefix_score: f64,
    pub substring_score: f64,
    /// Similarity must exceed this for an approximate match
    pub fuzzy_cutoff: f64,
    /// Multiplier applied to the similarity of an approximate match
    pub fuzzy_scale: f64,
}

impl Default for MatchTiers {
    fn default() -> Self {
        Self {
            prefix_score: 0.9,
            substring_score: 0.7,
            fuzzy_cutoff: 0.3,
            fuzzy_scale: 0.5,
        }
    }
}

/// Tiered matcher with configurable tier scores
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    tiers: MatchTiers,
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tiers(tiers: MatchTiers) -> Self {
        Self { tiers }
    }

    pub fn tiers(&self) -> &MatchTiers {
        &self.tiers
    }

    /// Match an already-normalized field against an already-normalized query.
    ///
    /// Returns `None` for an empty query or when nothing clears the cut-off.
    pub fn match_field(&self, field: &str, query: &str) -> Option<FieldMatch> {
        if query.is_empty() {
            return None;
        }

        let query_len = query.chars().count();

        if field == query {
            return Some(FieldMatch {
                score: 1.0,
                match_type: MatchType::Exact,
                span: Some((0, query_len)),
            });
        }

        if field.starts_with(query) {
            return Some(FieldMatch {
                score: self.tiers.prefix_score,
                match_type: MatchType::Prefix,
                span: Some((0, query_len)),
            });
        }

        if let Some(byte_pos) = field.find(query) {
            let start = field[..byte_pos].chars().count();
            return Some(FieldMatch {
                score: self.tiers.substring_score,
                match_type: MatchType::Substring,
                span: Some((start, start + query_len)),
            });
        }

        let sim = similarity(query, field);
        if sim > self.tiers.fuzzy_cutoff {
            return Some(FieldMatch {
                score: sim * self.tiers.fuzzy_scale,
                match_type: MatchType::Approximate,
                span: None,
            });
        }

        None
    }
}

/// Levenshtein distance over characters
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(row[j]).min(above)
            };
            diagonal = above;
        }
    }

    row[b_chars.len()]
}

/// `1 - distance / max(len)`, with two empty strings counting as identical.
///
/// Computed as `(longest - distance) / longest` so a ratio that equals a
/// decimal cut-off exactly also compares equal to it.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    (longest - levenshtein(a, b)) as f64 / longest as f64
}
