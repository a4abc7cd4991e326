//! Ranking & Scoring System
//!
//! Combines per-field matches into a single record score with configurable
//! field weights.

use super::fuzzy::{FuzzyMatcher, MatchType};
use super::parser::{normalize_text, ParsedQuery};
use crate::catalog::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Record fields the scorer looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchField {
    Name,
    NativeName,
    Family,
    Places,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::Name,
        SearchField::NativeName,
        SearchField::Family,
        SearchField::Places,
    ];

    /// Raw text of this field on `record`
    pub fn text(self, record: &Record) -> String {
        match self {
            SearchField::Name => record.name.clone(),
            SearchField::NativeName => record.native_name.clone(),
            SearchField::Family => record.family.clone(),
            SearchField::Places => record.places_text(),
        }
    }
}

/// Weight of each field in the combined score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub name: f64,
    pub native_name: f64,
    pub family: f64,
    pub places: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            name: 1.0,
            native_name: 0.8,
            family: 0.6,
            places: 0.4,
        }
    }
}

impl ScoringWeights {
    pub fn weight(&self, field: SearchField) -> f64 {
        match field {
            SearchField::Name => self.name,
            SearchField::NativeName => self.native_name,
            SearchField::Family => self.family,
            SearchField::Places => self.places,
        }
    }
}

/// Span of matched text within a field, in characters of the normalized field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub field: SearchField,
    pub start: usize,
    pub end: usize,
}

/// Combined score of one record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchScore {
    /// Score in `[0, 1]`
    pub final_score: f64,
    pub matched_fields: BTreeSet<SearchField>,
    pub highlights: Vec<Highlight>,
}

/// Scores records against a parsed query
#[derive(Debug, Clone, Default)]
pub struct RecordScorer {
    matcher: FuzzyMatcher,
    weights: ScoringWeights,
}

impl RecordScorer {
    pub fn new(matcher: FuzzyMatcher, weights: ScoringWeights) -> Self {
        Self { matcher, weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Weighted average of the field scores over every field with a
    /// positive weight. A field that does not match contributes 0 but its
    /// weight still counts. An exact match on the name pins the score to 1.0.
    pub fn score(&self, query: &ParsedQuery, record: &Record) -> MatchScore {
        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;
        let mut exact_name = false;
        let mut result = MatchScore::default();

        for field in SearchField::ALL {
            let weight = self.weights.weight(field);
            if weight <= 0.0 {
                continue;
            }
            weight_sum += weight;

            let text = normalize_text(&field.text(record));
            let Some(field_match) = self.matcher.match_field(&text, &query.normalized) else {
                continue;
            };

            if field == SearchField::Name && field_match.match_type == MatchType::Exact {
                exact_name = true;
            }

            weighted_sum += weight * field_match.score;
            result.matched_fields.insert(field);

            if let Some((start, end)) = field_match.span {
                result.highlights.push(Highlight { field, start, end });
            }
        }

        result.final_score = if exact_name {
            1.0
        } else if weight_sum > 0.0 {
            (weighted_sum / weight_sum).clamp(0.0, 1.0)
        } else {
            0.0
        };

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::fuzzy::MatchTiers;
    use crate::search::parser::QueryParser;

    fn mandarin() -> Record {
        Record::new("zh", "Mandarin Chinese", 5)
            .with_native_name("普通话")
            .with_family("Sino-Tibetan")
            .with_places(["China", "Taiwan"])
            .with_overall_score(9.0)
    }

    fn score(query: &str, record: &Record) -> MatchScore {
        let parsed = QueryParser::parse(query).unwrap();
        RecordScorer::default().score(&parsed, record)
    }

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.weight(SearchField::Name), 1.0);
        assert_eq!(weights.weight(SearchField::NativeName), 0.8);
        assert_eq!(weights.weight(SearchField::Family), 0.6);
        assert_eq!(weights.weight(SearchField::Places), 0.4);
    }

    #[test]
    fn test_exact_name_scores_one() {
        let result = score("MANDARIN CHINESE", &mandarin());
        assert_eq!(result.final_score, 1.0);
        assert!(result.matched_fields.contains(&SearchField::Name));
        assert_eq!(
            result.highlights[0],
            Highlight {
                field: SearchField::Name,
                start: 0,
                end: 16
            }
        );
    }

    #[test]
    fn test_substring_on_name() {
        let result = score("chin", &mandarin());
        // name substring (0.7 x 1.0) and places prefix "china, ..." (0.9 x 0.4)
        let expected = (0.7 + 0.9 * 0.4) / 2.8;
        assert!((result.final_score - expected).abs() < 1e-9);
        assert_eq!(
            result.matched_fields.iter().copied().collect::<Vec<_>>(),
            vec![SearchField::Name, SearchField::Places]
        );
    }

    #[test]
    fn test_mixed_tiers_average_by_weight() {
        let record = Record::new("pt", "Portuguese", 1)
            .with_family("Portuguese creoles")
            .with_places(["Portugal"]);

        let result = score("portuguese", &record);
        // exact name pins the score
        assert_eq!(result.final_score, 1.0);

        let result = score("portug", &record);
        // name prefix 0.9 x 1.0, family prefix 0.9 x 0.6, places prefix 0.9 x 0.4,
        // native name empty but still weighted
        assert!((result.final_score - 0.9 * 2.0 / 2.8).abs() < 1e-9);

        let result = score("creoles", &record);
        // "creoles" vs "portuguese" sits exactly on the fuzzy cut-off
        assert!((result.final_score - 0.7 * 0.6 / 2.8).abs() < 1e-9);
        assert_eq!(
            result.matched_fields.iter().copied().collect::<Vec<_>>(),
            vec![SearchField::Family]
        );
    }

    #[test]
    fn test_no_match_scores_zero() {
        let result = score("qqqqqqqq", &mandarin());
        assert_eq!(result.final_score, 0.0);
        assert!(result.matched_fields.is_empty());
        assert!(result.highlights.is_empty());
    }

    #[test]
    fn test_native_name_match() {
        let result = score("普通", &mandarin());
        assert!((result.final_score - 0.9 * 0.8 / 2.8).abs() < 1e-9);
        assert!(result.matched_fields.contains(&SearchField::NativeName));
    }

    #[test]
    fn test_single_low_weight_field_is_averaged_over_all_weights() {
        let record = Record::new("zh", "Mandarin Chinese", 5)
            .with_family("Sino-Tibetan")
            .with_places(["China", "Taiwan"]);

        let result = score("taiwan", &record);
        assert!((result.final_score - 0.7 * 0.4 / 2.8).abs() < 1e-9);
        assert_eq!(
            result.matched_fields.iter().copied().collect::<Vec<_>>(),
            vec![SearchField::Places]
        );

        let result = score("sino", &record);
        assert!((result.final_score - 0.9 * 0.6 / 2.8).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weight_field_is_ignored() {
        let weights = ScoringWeights {
            places: 0.0,
            ..ScoringWeights::default()
        };
        let scorer = RecordScorer::new(FuzzyMatcher::with_tiers(MatchTiers::default()), weights);
        let parsed = QueryParser::parse("taiwan").unwrap();

        let result = scorer.score(&parsed, &mandarin());
        assert!(!result.matched_fields.contains(&SearchField::Places));
        assert_eq!(result.final_score, 0.0);

        // zero weights leave the denominator too
        let parsed = QueryParser::parse("sino").unwrap();
        let result = scorer.score(&parsed, &mandarin());
        assert!((result.final_score - 0.9 * 0.6 / 2.4).abs() < 1e-9);
    }

    #[test]
    fn test_field_text() {
        let record = mandarin();
        assert_eq!(SearchField::Name.text(&record), "Mandarin Chinese");
        assert_eq!(SearchField::Places.text(&record), "China, Taiwan");
    }
}
