use std::path::{Path, PathBuf};

use pert_core::errors::StorageError;
use pert_core::tracing::events;
use pert_core::types::OutcomeRecord;

use crate::ledger;
use crate::traits::{OutcomeLog, OutcomeStore};

/// Outcome store backed by a JSONL file, one record per line.
#[derive(Debug, Clone)]
pub struct JsonlOutcomeStore {
    path: PathBuf,
}

impl JsonlOutcomeStore {
    /// Store at `path`. Nothing is created until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutcomeStore for JsonlOutcomeStore {
    fn append(&self, record: &OutcomeRecord) -> Result<(), StorageError> {
        let line = serde_json::to_string(record).map_err(|e| StorageError::Serialize {
            message: e.to_string(),
        })?;
        ledger::append_line(&self.path, &line)?;

        tracing::info!(
            event = events::OUTCOME_APPENDED,
            path = %self.path.display(),
            plan = %record.plan_name,
            outcome = record.actual_outcome.as_str(),
            predicted_confidence = ?record.predicted_confidence,
        );
        Ok(())
    }

    fn load_all(&self) -> Result<OutcomeLog, StorageError> {
        let Some(content) = ledger::read_locked(&self.path)? else {
            tracing::debug!(
                event = events::OUTCOMES_LOADED,
                path = %self.path.display(),
                records = 0,
                "outcome log does not exist yet"
            );
            return Ok(OutcomeLog::default());
        };

        let (records, malformed) = ledger::parse_lines(&self.path, &content, |line| {
            let record = serde_json::from_str::<OutcomeRecord>(line).map_err(|e| e.to_string())?;
            record.validate()?;
            Ok(record)
        });

        tracing::debug!(
            event = events::OUTCOMES_LOADED,
            path = %self.path.display(),
            records = records.len(),
            skipped = malformed.len(),
        );

        Ok(OutcomeLog { records, malformed })
    }
}
