//! One-shot keyed handoff between pipeline stages.

use parking_lot::Mutex;
use std::collections::HashMap;

use crate::errors::HandoffError;

/// Key under which each stage publishes its row payload.
///
/// One key name is reused across steps; entries are disambiguated by the
/// producing task's id.
pub const ROWS_KEY: &str = "rows";

/// A thread-safe store passing a serialized payload from one stage to the
/// next.
///
/// Entries are namespaced by the producing task id, pushed exactly once, and
/// consumed exactly once by the following stage: `pull` removes the entry.
#[derive(Debug, Default)]
pub struct TransferStore {
    entries: Mutex<HashMap<(String, String), String>>,
}

impl TransferStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a payload produced by `task_id` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `HandoffError::Conflict` if the task already pushed under
    /// this key.
    pub fn push(&self, task_id: &str, key: &str, payload: String) -> Result<(), HandoffError> {
        let mut entries = self.entries.lock();
        let entry_key = (task_id.to_string(), key.to_string());

        if entries.contains_key(&entry_key) {
            return Err(HandoffError::Conflict {
                task_id: task_id.to_string(),
                key: key.to_string(),
            });
        }

        entries.insert(entry_key, payload);
        Ok(())
    }

    /// Pulls and consumes the payload produced by `task_id` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `HandoffError::Missing` if no payload was pushed, or it was
    /// already consumed.
    pub fn pull(&self, task_id: &str, key: &str) -> Result<String, HandoffError> {
        self.entries
            .lock()
            .remove(&(task_id.to_string(), key.to_string()))
            .ok_or_else(|| HandoffError::Missing {
                task_id: task_id.to_string(),
                key: key.to_string(),
            })
    }

    /// Returns the number of unconsumed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if every pushed payload has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
