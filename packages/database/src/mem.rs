//! In-memory backend: a locked map, for tests and ephemeral runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use park_registry_park_models::{ParkCode, ParkRecord};

use crate::{DbError, store::ParkStore};

/// [`ParkStore`] backed by an in-process map. Contents do not survive a
/// restart.
#[derive(Default)]
pub struct MemoryParkStore {
    records: RwLock<BTreeMap<ParkCode, ParkRecord>>,
}

impl MemoryParkStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParkStore for MemoryParkStore {
    async fn get(&self, code: ParkCode) -> Result<Option<ParkRecord>, DbError> {
        let records = self.records.read().expect("park store lock poisoned");
        Ok(records.get(&code).cloned())
    }

    async fn put(&self, record: &ParkRecord) -> Result<(), DbError> {
        let mut records = self.records.write().expect("park store lock poisoned");
        records.insert(record.park_code, record.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ParkRecord>, DbError> {
        let records = self.records.read().expect("park store lock poisoned");
        Ok(records.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_returns_none_for_unwritten_codes() {
        let store = MemoryParkStore::new();
        assert!(store.get(ParkCode::Mnshaf).await.unwrap().is_none());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = MemoryParkStore::new();

        let mut record = ParkRecord::placeholder(ParkCode::Mogv);
        record.park_name = Some("Green Acres".to_string());
        record.lot_rent = Some(450.0);
        store.put(&record).await.unwrap();

        let stored = store.get(ParkCode::Mogv).await.unwrap().unwrap();
        assert_eq!(stored, record);
    }

    #[tokio::test]
    async fn put_replaces_wholesale() {
        let store = MemoryParkStore::new();

        let mut first = ParkRecord::placeholder(ParkCode::Mnwat);
        first.park_name = Some("Waterside".to_string());
        first.notes = Some("old notes".to_string());
        store.put(&first).await.unwrap();

        // A second write without notes must not preserve the old notes.
        let mut second = ParkRecord::placeholder(ParkCode::Mnwat);
        second.park_name = Some("Waterside".to_string());
        store.put(&second).await.unwrap();

        let stored = store.get(ParkCode::Mnwat).await.unwrap().unwrap();
        assert_eq!(stored.notes, None);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_returns_all_written_records() {
        let store = MemoryParkStore::new();
        store
            .put(&ParkRecord::placeholder(ParkCode::Mnshaf))
            .await
            .unwrap();
        store
            .put(&ParkRecord::placeholder(ParkCode::Misol))
            .await
            .unwrap();

        let codes: Vec<ParkCode> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.park_code)
            .collect();
        assert_eq!(codes.len(), 2);
        assert!(codes.contains(&ParkCode::Mnshaf));
        assert!(codes.contains(&ParkCode::Misol));
    }
}
