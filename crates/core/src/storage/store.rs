use std::sync::Mutex;

use crate::errors::CoreError;

/// The injected persistence dependency: one durable record, read and
/// written whole.
///
/// There is exactly one record and one logical thread of control, so the
/// contract is deliberately tiny — no keys, no locking, no versioning.
/// Implementations only report *whether* the medium cooperated; the
/// fail-soft policy (log and carry on) lives in `StorageManager`.
pub trait RecordStore: Send + Sync {
    /// Read the record. `Ok(None)` means no record has ever been written —
    /// a first run, not an error.
    fn read(&self) -> Result<Option<String>, CoreError>;

    /// Overwrite the record with `record` in full.
    fn write(&self, record: &str) -> Result<(), CoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    fn read(&self) -> Result<Option<String>, CoreError> {
        (**self).read()
    }

    fn write(&self, record: &str) -> Result<(), CoreError> {
        (**self).write(record)
    }
}

/// In-memory store for tests and embedders that handle durability
/// themselves (e.g., a frontend that owns the actual browser storage).
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, for simulating an existing saved record.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(record.into())),
        }
    }
}

impl RecordStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, CoreError> {
        let guard = self
            .record
            .lock()
            .map_err(|_| CoreError::StorageUnavailable("memory store poisoned".into()))?;
        Ok(guard.clone())
    }

    fn write(&self, record: &str) -> Result<(), CoreError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|_| CoreError::StorageUnavailable("memory store poisoned".into()))?;
        *guard = Some(record.to_string());
        Ok(())
    }
}
