//! Typeahead suggestions
//!
//! Scans names, native names, families and places for the partial query and
//! folds repeated values into one suggestion with an occurrence count.

use crate::catalog::Record;
use crate::search::normalize_text;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// What a suggestion refers to. Declaration order is ranking priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SuggestionKind {
    Entity,
    Family,
    Place,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub kind: SuggestionKind,
    /// Value to apply when the suggestion is picked
    pub value: String,
    /// Text to display
    pub label: String,
    /// Number of records that produced this suggestion
    pub occurrence_count: usize,
}

struct Candidate {
    suggestion: Suggestion,
    prefix: bool,
}

/// Stateless suggestion generator
pub struct SuggestionGenerator;

impl SuggestionGenerator {
    /// Suggestions for `partial`, at most `max_results` of them.
    ///
    /// A blank partial query lists the first entity names in catalogue order.
    pub fn suggest(partial: &str, records: &[Record], max_results: usize) -> Vec<Suggestion> {
        let query = normalize_text(partial);
        if query.is_empty() {
            return records
                .iter()
                .take(max_results)
                .map(|r| Suggestion {
                    kind: SuggestionKind::Entity,
                    value: r.name.clone(),
                    label: entity_label(r),
                    occurrence_count: 1,
                })
                .collect();
        }

        let mut candidates: Vec<Candidate> = Vec::new();
        let mut index: HashMap<(SuggestionKind, String), usize> = HashMap::new();

        for record in records {
            // a record counts once per (kind, value) however many of its fields hit
            let mut counted: HashSet<(SuggestionKind, String)> = HashSet::new();

            for (kind, value, label, haystacks) in record_terms(record) {
                let prefix = haystacks.iter().any(|h| normalize_text(h).starts_with(&query));
                let hit = prefix || haystacks.iter().any(|h| normalize_text(h).contains(&query));
                if !hit {
                    continue;
                }

                let key = (kind, value.clone());
                if !counted.insert(key.clone()) {
                    continue;
                }

                match index.get(&key) {
                    Some(&pos) => {
                        let existing = &mut candidates[pos];
                        existing.suggestion.occurrence_count += 1;
                        existing.prefix |= prefix;
                    }
                    None => {
                        index.insert(key, candidates.len());
                        candidates.push(Candidate {
                            suggestion: Suggestion {
                                kind,
                                value,
                                label,
                                occurrence_count: 1,
                            },
                            prefix,
                        });
                    }
                }
            }
        }

        // stable: remaining ties keep first-seen order
        candidates.sort_by(|a, b| {
            a.suggestion
                .kind
                .cmp(&b.suggestion.kind)
                .then_with(|| b.prefix.cmp(&a.prefix))
                .then_with(|| b.suggestion.occurrence_count.cmp(&a.suggestion.occurrence_count))
        });

        candidates
            .into_iter()
            .take(max_results)
            .map(|c| c.suggestion)
            .collect()
    }
}

/// `(kind, value, label, texts to match)` for every suggestible term of a record
fn record_terms(record: &Record) -> Vec<(SuggestionKind, String, String, Vec<&str>)> {
    let mut terms = Vec::with_capacity(2 + record.places.len());

    let mut entity_texts = vec![record.name.as_str()];
    if !record.native_name.is_empty() {
        entity_texts.push(record.native_name.as_str());
    }
    terms.push((
        SuggestionKind::Entity,
        record.name.clone(),
        entity_label(record),
        entity_texts,
    ));

    if !record.family.trim().is_empty() {
        terms.push((
            SuggestionKind::Family,
            record.family.clone(),
            record.family.clone(),
            vec![record.family.as_str()],
        ));
    }

    for place in &record.places {
        terms.push((
            SuggestionKind::Place,
            place.clone(),
            place.clone(),
            vec![place.as_str()],
        ));
    }

    terms
}

fn entity_label(record: &Record) -> String {
    if record.native_name.is_empty() || record.native_name == record.name {
        record.name.clone()
    } else {
        format!("{} ({})", record.name, record.native_name)
    }
}
