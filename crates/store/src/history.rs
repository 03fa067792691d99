//! History cache
//!
//! Keeps the five most recent generations under a single storage key as a
//! JSON array, most recent first. Loading never fails: an absent, unreadable
//! or malformed value is treated as an empty history.

use componentai_core::{GenerationRecord, HistoryLog};

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;

/// Storage key for the history log
pub const HISTORY_KEY: &str = "componentai-history";

// ============================================================================
// HistoryCache
// ============================================================================

/// Bounded, persisted log of recent generations
#[derive(Debug)]
pub struct HistoryCache<S: KeyValueStore> {
    store: S,
    log: HistoryLog,
}

impl<S: KeyValueStore> HistoryCache<S> {
    /// Open the cache and load whatever is persisted
    pub fn open(store: S) -> Self {
        let mut cache = Self {
            store,
            log: HistoryLog::new(),
        };
        cache.load();
        cache
    }

    /// Re-read the persisted log.
    ///
    /// Returns an empty log if nothing is stored or the stored value cannot
    /// be decoded.
    pub fn load(&mut self) -> HistoryLog {
        self.log = read_log(&self.store);
        self.log.clone()
    }

    /// Prepend `record`, keep the first five entries, persist, and return the new log
    pub fn append(&mut self, record: GenerationRecord) -> StoreResult<HistoryLog> {
        let mut next = self.log.clone();
        next.push(record);
        self.write(&next)?;
        self.log = next;
        tracing::debug!("History now holds {} record(s)", self.log.len());
        Ok(self.log.clone())
    }

    /// Empty the log and remove the persisted entry
    pub fn clear(&mut self) -> StoreResult<HistoryLog> {
        self.store.remove(HISTORY_KEY)?;
        self.log.clear();
        tracing::info!("History cleared");
        Ok(HistoryLog::new())
    }

    /// The log as last loaded or written
    pub fn log(&self) -> &HistoryLog {
        &self.log
    }

    /// Access the backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn write(&self, log: &HistoryLog) -> StoreResult<()> {
        let json = serde_json::to_string(log).map_err(|e| StoreError::Encode {
            key: HISTORY_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(HISTORY_KEY, &json)
    }
}

/// Decode the persisted log, treating anything unusable as empty
fn read_log<S: KeyValueStore>(store: &S) -> HistoryLog {
    let raw = match store.get(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return HistoryLog::new(),
        Err(e) => {
            tracing::warn!("Could not read history, starting empty: {}", e);
            return HistoryLog::new();
        }
    };

    match serde_json::from_str::<Vec<GenerationRecord>>(&raw) {
        Ok(records) => HistoryLog::from_records(records),
        Err(e) => {
            tracing::warn!("Ignoring malformed history value: {}", e);
            HistoryLog::new()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
