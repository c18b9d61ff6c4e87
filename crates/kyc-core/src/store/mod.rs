//! Insert-only record persistence.

mod jsonl;
mod memory;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use tracing::info;

use crate::error::StoreError;
use crate::models::config::{StorageBackend, StorageConfig};
use crate::models::record::{DocumentKind, ExtractedRecord, PersistedRecord};

/// Persistence gateway for extracted records.
///
/// Each document type is kept in its own collection and every insert
/// returns a freshly generated identifier.
pub trait RecordStore: Send + Sync {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Insert a record and return it with its generated identifier.
    fn insert(&self, record: &ExtractedRecord) -> Result<PersistedRecord, StoreError>;

    /// Number of records stored for a document type.
    fn count(&self, kind: DocumentKind) -> Result<usize, StoreError>;
}

/// Open the store selected by the configuration.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn RecordStore>, StoreError> {
    let store: Arc<dyn RecordStore> = match config.backend {
        StorageBackend::Jsonl => Arc::new(JsonlStore::open(&config.data_dir)?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    info!("Using {} record store", store.name());
    Ok(store)
}
