//! Storage configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CALIBRATION_DIR, DEFAULT_HISTORY_FILE, DEFAULT_OUTCOMES_FILE};

/// Locations of the outcome log and the multiplier history.
///
/// Relative paths resolve against the project root.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding both logs. Default: `.calibration`.
    pub calibration_dir: Option<String>,
    /// Outcome log path. Default: `<calibration_dir>/outcomes.jsonl`.
    pub outcomes_path: Option<String>,
    /// Multiplier history path. Default: `<calibration_dir>/multiplier-history.txt`.
    pub history_path: Option<String>,
}

impl StorageConfig {
    pub fn effective_calibration_dir(&self, root: &Path) -> PathBuf {
        root.join(
            self.calibration_dir
                .as_deref()
                .unwrap_or(DEFAULT_CALIBRATION_DIR),
        )
    }

    pub fn effective_outcomes_path(&self, root: &Path) -> PathBuf {
        match self.outcomes_path {
            Some(ref p) => root.join(p),
            None => self.effective_calibration_dir(root).join(DEFAULT_OUTCOMES_FILE),
        }
    }

    pub fn effective_history_path(&self, root: &Path) -> PathBuf {
        match self.history_path {
            Some(ref p) => root.join(p),
            None => self.effective_calibration_dir(root).join(DEFAULT_HISTORY_FILE),
        }
    }
}
