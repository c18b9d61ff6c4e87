//! Append-only JSON lines record store.
//!
//! Each collection is a `<collection>.jsonl` file in the data directory;
//! every line is one persisted record.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::record::{DocumentKind, ExtractedRecord, PersistedRecord};

use super::RecordStore;

/// Record store writing one JSON document per line.
#[derive(Debug)]
pub struct JsonlStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlStore {
    /// Open a store in `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir)?;
        info!("Opened JSONL record store at {}", dir.display());

        Ok(Self {
            dir: dir.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the file backing a document type's collection.
    pub fn collection_path(&self, kind: DocumentKind) -> PathBuf {
        self.dir.join(format!("{}.jsonl", kind.collection()))
    }
}

impl RecordStore for JsonlStore {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    fn insert(&self, record: &ExtractedRecord) -> Result<PersistedRecord, StoreError> {
        let persisted = PersistedRecord::new(record.clone());
        let mut line = serde_json::to_string(&persisted)?;
        line.push('\n');

        let path = self.collection_path(persisted.kind());
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("write lock poisoned: {}", e)))?;

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        append_line(&mut file, line.as_bytes())?;

        debug!("Inserted {} into {}", persisted.id, path.display());
        Ok(persisted)
    }

    fn count(&self, kind: DocumentKind) -> Result<usize, StoreError> {
        let path = self.collection_path(kind);
        if !path.exists() {
            return Ok(0);
        }

        let reader = BufReader::new(fs::File::open(&path)?);
        let mut count = 0;
        for line in reader.lines() {
            if !line?.trim().is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// A file that can be cut back to an earlier length.
trait Truncate: Write {
    fn current_len(&self) -> io::Result<u64>;
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;
}

impl Truncate for File {
    fn current_len(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Append `line`, or leave the target at its previous length if the write fails.
fn append_line<T: Truncate>(target: &mut T, line: &[u8]) -> io::Result<()> {
    let previous_len = target.current_len()?;

    if let Err(err) = target.write_all(line).and_then(|()| target.flush()) {
        warn!("Append failed, truncating back to {} bytes: {}", previous_len, err);
        target.truncate_to(previous_len)?;
        return Err(err);
    }
    Ok(())
}
