use proptest::prelude::*;

use super::fuzzy::{levenshtein, similarity};
use super::ranking::RecordScorer;
use super::{QueryParser, SearchEngine};
use crate::catalog::Record;

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,12}"
}

fn record_strategy() -> impl Strategy<Value = Record> {
    (word(), word(), word(), proptest::collection::vec(word(), 1..4), 0u8..=5)
        .prop_map(|(name, native, family, places, tier)| {
            Record::new(format!("id-{}", name), name, tier)
                .with_native_name(native)
                .with_family(family)
                .with_places(places)
        })
}

// Property test: edit distance is a metric on the inputs we care about
proptest! {
    #[test]
    fn levenshtein_symmetric_and_bounded(a in "[a-zñ ]{0,16}", b in "[a-zñ ]{0,16}") {
        let d = levenshtein(&a, &b);
        prop_assert_eq!(d, levenshtein(&b, &a));
        prop_assert!(d <= a.chars().count().max(b.chars().count()));
        prop_assert_eq!(levenshtein(&a, &a), 0);

        let sim = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&sim));
    }
}

// Property test: every record score lies in [0, 1]
proptest! {
    #[test]
    fn record_score_is_bounded(record in record_strategy(), query in "[a-z]{1,10}") {
        let parsed = QueryParser::parse(&query).unwrap();
        let scored = RecordScorer::default().score(&parsed, &record);
        prop_assert!(scored.final_score >= 0.0);
        prop_assert!(scored.final_score <= 1.0);
        prop_assert_eq!(scored.matched_fields.is_empty(), scored.final_score == 0.0);
    }
}

// Property test: an exact name query scores 1.0 and is returned
proptest! {
    #[test]
    fn exact_name_floor(records in proptest::collection::vec(record_strategy(), 1..8), pick in any::<prop::sample::Index>()) {
        let target = &records[pick.index(records.len())];
        let query = target.name.to_uppercase();

        let results = SearchEngine::new().search_records(&query, &records);
        let hit = results.iter().find(|r| r.record.id == target.id);
        prop_assert!(hit.is_some());
        prop_assert_eq!(hit.map(|r| r.score), Some(1.0));
    }
}

// Property test: searching twice yields identical ordered output
proptest! {
    #[test]
    fn search_is_deterministic(records in proptest::collection::vec(record_strategy(), 0..10), query in "[a-z]{1,6}") {
        let engine = SearchEngine::new();
        let first = engine.search_records(&query, &records);
        let second = engine.search_records(&query, &records);
        prop_assert_eq!(&first, &second);

        for pair in first.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        prop_assert!(first.iter().all(|r| r.score >= 0.3));
    }
}

// Property test: unless the name matches exactly, a record can score no more
// than the share of the total weight carried by the fields it matched
proptest! {
    #[test]
    fn score_bounded_by_matched_weight_share(record in record_strategy(), query in "[a-z]{1,10}") {
        let parsed = QueryParser::parse(&query).unwrap();
        let scorer = RecordScorer::default();
        let scored = scorer.score(&parsed, &record);
        prop_assume!(parsed.normalized != record.name.to_lowercase());

        let weights = scorer.weights();
        let total = weights.name + weights.native_name + weights.family + weights.places;
        let matched: f64 = scored
            .matched_fields
            .iter()
            .map(|field| weights.weight(*field))
            .sum();
        prop_assert!(scored.final_score <= matched / total + 1e-9);
    }
}
