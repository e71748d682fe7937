//! Persistent history of saved calculations.
//!
//! The whole history lives in a single JSON blob under one key of a
//! [`KeyValueStore`]. Every change is a read-modify-write of that blob, so
//! writers are serialized through a lock held by the [`History`] handle.
//!
//! Only [`History::append`] reports failures to the caller. Reads, deletes
//! and clears log the problem and behave as if the history were empty or
//! unchanged.

mod record;
mod store;

pub use record::{CalculationRecord, SectionSnapshot, next_record_id};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::HistoryError;

/// Key the history blob is stored under.
pub const HISTORY_STORAGE_KEY: &str = "wifi_calculator_history";

/// Version written into the persisted document.
pub const HISTORY_FORMAT_VERSION: u64 = 1;

#[derive(Serialize)]
struct HistoryDocumentRef<'a> {
    version: u64,
    entries: &'a [CalculationRecord],
}

#[derive(Deserialize)]
struct HistoryDocument {
    entries: Vec<CalculationRecord>,
}

/// Decode a persisted blob.
///
/// Accepts the versioned document as well as a bare array of records.
fn decode(blob: &str) -> Result<Vec<CalculationRecord>, HistoryError> {
    let value: Value = serde_json::from_str(blob)?;
    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }

    let Some(map) = value.as_object() else {
        return Err(HistoryError::Malformed);
    };
    let version = map.get("version").and_then(Value::as_u64);
    if version != Some(HISTORY_FORMAT_VERSION) {
        return Err(HistoryError::UnsupportedVersion(version));
    }

    let document: HistoryDocument = serde_json::from_value(value)?;
    Ok(document.entries)
}

fn encode(records: &[CalculationRecord]) -> Result<String, HistoryError> {
    let document = HistoryDocumentRef {
        version: HISTORY_FORMAT_VERSION,
        entries: records,
    };
    Ok(serde_json::to_string(&document)?)
}

/// What [`History::delete`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    NotFound,
    /// The history could not be read or written; the error was logged.
    Failed,
}

/// Handle to the calculation history in a store.
pub struct History<S> {
    store: S,
    key: String,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> History<S> {
    /// Open the history stored under [`HISTORY_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, HISTORY_STORAGE_KEY)
    }

    /// Open the history stored under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&self) -> Result<Vec<CalculationRecord>, HistoryError> {
        match self.store.get(&self.key)? {
            Some(blob) => decode(&blob),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, records: &[CalculationRecord]) -> Result<(), HistoryError> {
        let blob = encode(records)?;
        self.store.set(&self.key, &blob)?;
        Ok(())
    }

    /// All saved records, newest first.
    ///
    /// A missing, unreadable or corrupt history reads as empty.
    pub fn list(&self) -> Vec<CalculationRecord> {
        match self.load() {
            Ok(records) => records,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to load history");
                Vec::new()
            }
        }
    }

    /// Look up one record by id.
    pub fn get(&self, id: &str) -> Option<CalculationRecord> {
        self.list().into_iter().find(|record| record.id() == id)
    }

    /// Add a record to the front of the history.
    ///
    /// A corrupt blob is replaced. A blob written by a newer format version
    /// or a backend failure is left untouched and the error is returned.
    pub fn append(&self, record: CalculationRecord) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let result = self.try_append(record);
        if let Err(err) = &result {
            error!(key = %self.key, error = %err, "failed to add calculation to history");
        }
        result
    }

    fn try_append(&self, record: CalculationRecord) -> Result<(), HistoryError> {
        let mut records = match self.load() {
            Ok(records) => records,
            Err(err @ (HistoryError::Serialization(_) | HistoryError::Malformed)) => {
                warn!(key = %self.key, error = %err, "discarding unreadable history");
                Vec::new()
            }
            Err(err) => return Err(err),
        };

        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(HistoryError::DuplicateId(record.id().to_string()));
        }

        debug!(id = record.id(), "adding calculation to history");
        records.insert(0, record);
        self.save(&records)
    }

    /// Remove the record with `id`.
    ///
    /// Failures are logged and reported as [`DeleteOutcome::Failed`]; the
    /// stored history is left as it was.
    pub fn delete(&self, id: &str) -> DeleteOutcome {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        match self.try_delete(id) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(key = %self.key, id, error = %err, "failed to delete history item");
                DeleteOutcome::Failed
            }
        }
    }

    fn try_delete(&self, id: &str) -> Result<DeleteOutcome, HistoryError> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            return Ok(DeleteOutcome::NotFound);
        }

        self.save(&records)?;
        Ok(DeleteOutcome::Removed)
    }

    /// Remove the whole history entry from the store.
    pub fn clear(&self) {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = self.store.remove(&self.key) {
            error!(key = %self.key, error = %err, "failed to clear history");
        }
    }
}
