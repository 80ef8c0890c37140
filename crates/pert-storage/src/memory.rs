use std::sync::{Mutex, MutexGuard};

use pert_core::errors::StorageError;
use pert_core::types::OutcomeRecord;

use crate::traits::{OutcomeLog, OutcomeStore};

/// Outcome store held in memory. Never produces malformed entries.
#[derive(Debug, Default)]
pub struct InMemoryOutcomeStore {
    records: Mutex<Vec<OutcomeRecord>>,
}

impl InMemoryOutcomeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `records`, in order.
    pub fn with_records(records: impl IntoIterator<Item = OutcomeRecord>) -> Self {
        Self {
            records: Mutex::new(records.into_iter().collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<OutcomeRecord>> {
        // A panic while holding the lock cannot leave a half-written Vec.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl OutcomeStore for InMemoryOutcomeStore {
    fn append(&self, record: &OutcomeRecord) -> Result<(), StorageError> {
        self.guard().push(record.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<OutcomeLog, StorageError> {
        Ok(OutcomeLog {
            records: self.guard().clone(),
            malformed: Vec::new(),
        })
    }
}
