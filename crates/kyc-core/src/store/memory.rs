//! Process-local record store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::error::StoreError;
use crate::models::record::{DocumentKind, ExtractedRecord, PersistedRecord};

use super::RecordStore;

/// Keeps records in memory, grouped by document type.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<DocumentKind, Vec<PersistedRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records stored for a document type, in insertion order.
    pub fn records(&self, kind: DocumentKind) -> Result<Vec<PersistedRecord>, StoreError> {
        Ok(self.lock()?.get(&kind).cloned().unwrap_or_default())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<DocumentKind, Vec<PersistedRecord>>>, StoreError> {
        self.collections
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("memory store lock poisoned: {}", e)))
    }
}

impl RecordStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn insert(&self, record: &ExtractedRecord) -> Result<PersistedRecord, StoreError> {
        let persisted = PersistedRecord::new(record.clone());
        self.lock()?
            .entry(persisted.kind())
            .or_default()
            .push(persisted.clone());

        debug!(
            "Inserted {} into {}",
            persisted.id,
            persisted.kind().collection()
        );
        Ok(persisted)
    }

    fn count(&self, kind: DocumentKind) -> Result<usize, StoreError> {
        Ok(self.lock()?.get(&kind).map_or(0, Vec::len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{IdentityRecord, TaxIdRecord};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collections_are_separate() {
        let store = MemoryStore::new();
        let identity = ExtractedRecord::Identity(IdentityRecord {
            name: Some("Asha Rao".to_string()),
            ..Default::default()
        });

        let inserted = store.insert(&identity).unwrap();
        store
            .insert(&ExtractedRecord::TaxId(TaxIdRecord::default()))
            .unwrap();
        store
            .insert(&ExtractedRecord::TaxId(TaxIdRecord::default()))
            .unwrap();

        assert_eq!(store.count(DocumentKind::Identity).unwrap(), 1);
        assert_eq!(store.count(DocumentKind::TaxId).unwrap(), 2);

        let records = store.records(DocumentKind::Identity).unwrap();
        assert_eq!(records[0].id, inserted.id);
        assert_eq!(records[0].record, identity);
    }

    #[test]
    fn test_empty_collection() {
        let store = MemoryStore::new();
        assert_eq!(store.count(DocumentKind::Identity).unwrap(), 0);
        assert!(store.records(DocumentKind::TaxId).unwrap().is_empty());
    }
}
