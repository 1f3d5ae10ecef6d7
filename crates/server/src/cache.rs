//! In-process memoization of per-doctor disease record fetches

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use carecms_core::record::DiseaseRecord;

/// Memoized disease-record fetches, keyed by doctor identifier.
///
/// Entries live for the life of the process and are not invalidated when
/// the underlying store changes.
#[derive(Clone, Default)]
pub struct AnalyticsCache {
    inner: Arc<Mutex<HashMap<Uuid, Arc<Vec<DiseaseRecord>>>>>,
}

impl AnalyticsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, doctor_id: &Uuid) -> Option<Arc<Vec<DiseaseRecord>>> {
        self.inner
            .lock()
            .expect("analytics cache lock poisoned")
            .get(doctor_id)
            .cloned()
    }

    pub fn insert(&self, doctor_id: Uuid, records: Vec<DiseaseRecord>) -> Arc<Vec<DiseaseRecord>> {
        let records = Arc::new(records);
        self.inner
            .lock()
            .expect("analytics cache lock poisoned")
            .insert(doctor_id, Arc::clone(&records));
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(disease: &str) -> DiseaseRecord {
        DiseaseRecord {
            disease: disease.to_string(),
            severity: "mild".to_string(),
        }
    }

    #[test]
    fn second_read_returns_the_memoized_records() {
        let cache = AnalyticsCache::new();
        let doctor = Uuid::from_u128(1);
        assert!(cache.get(&doctor).is_none());

        cache.insert(doctor, vec![record("flu")]);
        let hit = cache.get(&doctor).unwrap();
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].disease, "flu");
    }

    #[test]
    fn entries_are_keyed_per_doctor() {
        let cache = AnalyticsCache::new();
        cache.insert(Uuid::from_u128(1), vec![record("flu")]);
        assert!(cache.get(&Uuid::from_u128(2)).is_none());
    }
}
