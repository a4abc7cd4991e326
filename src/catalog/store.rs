//! Versioned, read-only record snapshots
//!
//! A `RecordStore` is the only way records reach the engine. Construction
//! validates every record; afterwards the snapshot is immutable and cheap to
//! clone. Each construction gets a fresh version so holders can tell whether
//! the catalogue they derived state from has been replaced.

use super::error::CatalogError;
use super::record::{study_hours_for_tier, Record, MAX_TIER};
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

fn next_version() -> u64 {
    NEXT_VERSION.fetch_add(1, Ordering::Relaxed)
}

/// Immutable snapshot of the catalogue
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[Record]>,
    version: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl RecordStore {
    /// Validate `records` and freeze them into a new snapshot
    pub fn new(records: Vec<Record>) -> Result<Self, CatalogError> {
        let mut seen_ids = HashSet::with_capacity(records.len());
        let mut accepted = Vec::with_capacity(records.len());

        for (index, mut record) in records.into_iter().enumerate() {
            validate_record(index, &record)?;

            if !seen_ids.insert(record.id.clone()) {
                return Err(CatalogError::DuplicateId(record.id));
            }

            dedup_places(&mut record.places);
            accepted.push(record);
        }

        let store = Self {
            records: accepted.into(),
            version: next_version(),
        };
        debug!(
            "Built record store v{} with {} records",
            store.version,
            store.len()
        );
        Ok(store)
    }

    pub fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            version: next_version(),
        }
    }

    /// Parse a JSON array of records
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<Record> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Read and parse a catalogue file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let data = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&data)?;
        info!(
            "Loaded {} records from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// True when both handles share the same snapshot
    pub fn same_snapshot(&self, other: &RecordStore) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

fn validate_record(index: usize, record: &Record) -> Result<(), CatalogError> {
    if record.id.trim().is_empty() {
        return Err(CatalogError::BlankField { index, field: "id" });
    }
    if record.name.trim().is_empty() {
        return Err(CatalogError::BlankField {
            index,
            field: "name",
        });
    }

    if record.tier > MAX_TIER {
        return Err(CatalogError::TierOutOfRange {
            id: record.id.clone(),
            tier: record.tier,
        });
    }

    let consistent = study_hours_for_tier(record.tier)
        .is_some_and(|range| range.contains(&record.study_hours));
    if !consistent {
        return Err(CatalogError::StudyHoursMismatch {
            id: record.id.clone(),
            tier: record.tier,
            hours: record.study_hours,
        });
    }

    if record.places.iter().all(|p| p.trim().is_empty()) {
        return Err(CatalogError::NoPlaces {
            id: record.id.clone(),
        });
    }

    if !record.overall_score.is_finite() || record.overall_score < 0.0 {
        return Err(CatalogError::InvalidScore {
            id: record.id.clone(),
            score: record.overall_score,
        });
    }

    Ok(())
}

/// Drop blank and repeated places, keeping the first occurrence
fn dedup_places(places: &mut Vec<String>) {
    let mut seen = HashSet::new();
    places.retain(|p| !p.trim().is_empty() && seen.insert(p.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn spanish() -> Record {
        Record::new("es", "Spanish", 1)
            .with_places(["Spain", "Mexico"])
            .with_overall_score(3.0)
    }

    #[test]
    fn test_new_store() {
        let store = RecordStore::new(vec![spanish()]).unwrap();
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
        assert_eq!(store.get("es").unwrap().name, "Spanish");
        assert!(store.get("fr").is_none());
    }

    #[test]
    fn test_versions_are_distinct() {
        let a = RecordStore::new(vec![spanish()]).unwrap();
        let b = RecordStore::new(vec![spanish()]).unwrap();
        assert_ne!(a.version(), b.version());

        let clone = a.clone();
        assert_eq!(clone.version(), a.version());
        assert!(clone.same_snapshot(&a));
        assert!(!b.same_snapshot(&a));
    }

    #[test]
    fn test_empty_store() {
        let store = RecordStore::empty();
        assert!(store.is_empty());
        assert_eq!(store.records(), &[] as &[Record]);
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let result = RecordStore::new(vec![spanish(), spanish()]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "es"));
    }

    #[test]
    fn test_rejects_bad_tier() {
        let record = Record::new("xx", "Unknown", 7).with_places(["Nowhere"]);
        let result = RecordStore::new(vec![record]);
        assert!(matches!(result, Err(CatalogError::TierOutOfRange { tier: 7, .. })));
    }

    #[test]
    fn test_rejects_inconsistent_hours() {
        let record = spanish().with_study_hours(2200);
        let result = RecordStore::new(vec![record]);
        assert!(matches!(
            result,
            Err(CatalogError::StudyHoursMismatch { hours: 2200, .. })
        ));

        // anywhere inside the tier 1 band is fine
        let record = spanish().with_study_hours(750);
        assert!(RecordStore::new(vec![record]).is_ok());
    }

    #[test]
    fn test_rejects_missing_places() {
        let record = Record::new("es", "Spanish", 1);
        assert!(matches!(
            RecordStore::new(vec![record]),
            Err(CatalogError::NoPlaces { .. })
        ));

        let record = Record::new("es", "Spanish", 1).with_places(["  "]);
        assert!(matches!(
            RecordStore::new(vec![record]),
            Err(CatalogError::NoPlaces { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_score() {
        let record = spanish().with_overall_score(-1.0);
        assert!(matches!(
            RecordStore::new(vec![record]),
            Err(CatalogError::InvalidScore { .. })
        ));

        let record = spanish().with_overall_score(f64::NAN);
        assert!(RecordStore::new(vec![record]).is_err());
    }

    #[test]
    fn test_rejects_blank_name() {
        let record = Record::new("es", " ", 1).with_places(["Spain"]);
        assert!(matches!(
            RecordStore::new(vec![record]),
            Err(CatalogError::BlankField { field: "name", .. })
        ));
    }

    #[test]
    fn test_places_are_deduplicated() {
        let record = spanish().with_places(["Spain", "Mexico", "Spain", "", "Peru"]);
        let store = RecordStore::new(vec![record]).unwrap();
        assert_eq!(store.records()[0].places, vec!["Spain", "Mexico", "Peru"]);
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"id": "es", "name": "Spanish", "tier": 1, "places": ["Spain"],
             "overallScore": 3, "studyHours": 600},
            {"id": "zh", "name": "Mandarin Chinese", "tier": 5, "places": ["China"],
             "overallScore": 9, "studyHours": 2200}
        ]"#;

        let store = RecordStore::from_json_str(json).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[1].name, "Mandarin Chinese");
    }

    #[test]
    fn test_from_json_str_malformed() {
        let result = RecordStore::from_json_str(r#"[{"id": "es"}]"#);
        assert!(matches!(result, Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "fr", "name": "French", "tier": 1, "places": ["France"],
                 "overallScore": 4, "studyHours": 750}}]"#
        )
        .unwrap();

        let store = RecordStore::load(file.path()).unwrap();
        assert_eq!(store.get("fr").unwrap().study_hours, 750);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RecordStore::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
