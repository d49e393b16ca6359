use tracing::{debug, warn};

use crate::models::portfolio::Portfolio;
use crate::services::transcode_service::TranscodeService;

use super::store::RecordStore;

/// Fail-soft persistence layer over a [`RecordStore`].
///
/// This is a single-writer, single-reader, best-effort cache: losing
/// durability must never crash the interactive session, so neither `load`
/// nor `save` can fail the caller. Corruption and medium failures are
/// logged and absorbed — `load` degrades to an empty portfolio, and after a
/// failed `save` the in-memory state simply stays the source of truth for
/// the current session.
pub struct StorageManager {
    store: Box<dyn RecordStore>,
    transcoder: TranscodeService,
}

impl StorageManager {
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self {
            store,
            transcoder: TranscodeService::new(),
        }
    }

    /// Load the persisted portfolio.
    ///
    /// First run (no record), a corrupt record, or an unavailable medium
    /// all yield an empty portfolio; only the log tells them apart. The
    /// record is decoded through the transcoder, so legacy investment-only
    /// entries are normalized before any other component sees them.
    #[must_use]
    pub fn load(&self) -> Portfolio {
        let record = match self.store.read() {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("no persisted portfolio record, starting empty");
                return Portfolio::new();
            }
            Err(e) => {
                warn!(error = %e, "failed to read portfolio record, starting empty");
                return Portfolio::new();
            }
        };

        match self.transcoder.decode_document(&record) {
            Ok(portfolio) => {
                debug!(holdings = portfolio.len(), "loaded persisted portfolio");
                portfolio
            }
            Err(e) => {
                warn!(error = %e, "persisted portfolio record is corrupt, starting empty");
                Portfolio::new()
            }
        }
    }

    /// Persist the whole portfolio as one record, overwriting the prior
    /// value. Failures (quota, I/O, serialization) are logged and swallowed.
    pub fn save(&self, portfolio: &Portfolio) {
        let record = match self.transcoder.export_document(portfolio) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "failed to serialize portfolio, not saved");
                return;
            }
        };

        match self.store.write(&record) {
            Ok(()) => debug!(holdings = portfolio.len(), "saved portfolio"),
            Err(e) => warn!(error = %e, "failed to save portfolio, keeping in-memory state"),
        }
    }
}

impl std::fmt::Debug for StorageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageManager").finish_non_exhaustive()
    }
}
