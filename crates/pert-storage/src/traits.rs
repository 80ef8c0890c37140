use pert_core::errors::{MalformedRecord, StorageError};
use pert_core::types::OutcomeRecord;

/// Append-only store of (prediction, outcome) records.
///
/// Records are never updated or deleted once appended.
pub trait OutcomeStore {
    /// Durably append one record.
    fn append(&self, record: &OutcomeRecord) -> Result<(), StorageError>;

    /// Read every record. Unparseable entries are skipped and listed in
    /// [`OutcomeLog::malformed`].
    fn load_all(&self) -> Result<OutcomeLog, StorageError>;
}

/// Records read from an outcome store plus the lines that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutcomeLog {
    pub records: Vec<OutcomeRecord>,
    pub malformed: Vec<MalformedRecord>,
}

impl OutcomeLog {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when no line had to be skipped.
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }
}
