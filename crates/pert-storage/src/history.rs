//! Plain-text history of applied multiplier adjustments.
//!
//! Line format:
//!
//! ```text
//! 2026-01-15T10:00:00Z: 2.00 → 2.40 (calibration error: +20.0%)
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

use pert_core::errors::{MalformedRecord, StorageError};
use pert_core::tracing::events;
use pert_core::types::CalibrationMultiplier;

use crate::ledger;

const ARROW: &str = " → ";
const ERROR_OPEN: &str = " (calibration error: ";
const ERROR_CLOSE: &str = "%)";

/// One accepted multiplier change.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentEntry {
    pub timestamp: DateTime<Utc>,
    pub previous: CalibrationMultiplier,
    pub applied: CalibrationMultiplier,
    /// Mean calibration error that motivated the change, in percentage points.
    pub calibration_error: f64,
}

impl AdjustmentEntry {
    /// Entry stamped with the current time.
    pub fn new(
        previous: CalibrationMultiplier,
        applied: CalibrationMultiplier,
        calibration_error: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            previous,
            applied,
            calibration_error,
        }
    }
}

impl fmt::Display for AdjustmentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}{ARROW}{}{ERROR_OPEN}{:+.1}{ERROR_CLOSE}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.previous,
            self.applied,
            self.calibration_error,
        )
    }
}

impl FromStr for AdjustmentEntry {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (stamp, rest) = line
            .split_once(": ")
            .ok_or_else(|| "missing timestamp separator".to_string())?;
        let timestamp = DateTime::parse_from_rfc3339(stamp)
            .map_err(|e| format!("invalid timestamp {stamp:?}: {e}"))?
            .with_timezone(&Utc);

        let (previous, rest) = rest
            .split_once(ARROW)
            .ok_or_else(|| "missing arrow between multipliers".to_string())?;
        let (applied, rest) = rest
            .split_once(ERROR_OPEN)
            .ok_or_else(|| "missing calibration error".to_string())?;
        let error = rest
            .strip_suffix(ERROR_CLOSE)
            .ok_or_else(|| "unterminated calibration error".to_string())?;

        Ok(Self {
            timestamp,
            previous: parse_multiplier(previous)?,
            applied: parse_multiplier(applied)?,
            calibration_error: error
                .parse::<f64>()
                .map_err(|e| format!("invalid calibration error {error:?}: {e}"))?,
        })
    }
}

fn parse_multiplier(text: &str) -> Result<CalibrationMultiplier, String> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid multiplier {text:?}: {e}"))?;
    CalibrationMultiplier::new(value).map_err(|e| e.to_string())
}

/// Entries read from the history plus the lines that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLog {
    pub entries: Vec<AdjustmentEntry>,
    pub malformed: Vec<MalformedRecord>,
}

/// Append-only multiplier history file.
#[derive(Debug, Clone)]
pub struct MultiplierHistory {
    path: PathBuf,
}

impl MultiplierHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &AdjustmentEntry) -> Result<(), StorageError> {
        ledger::append_line(&self.path, &entry.to_string())?;
        tracing::info!(
            event = events::ADJUSTMENT_RECORDED,
            path = %self.path.display(),
            previous = entry.previous.value(),
            applied = entry.applied.value(),
            calibration_error = entry.calibration_error,
        );
        Ok(())
    }

    /// Every entry in file order. A missing file reads as empty.
    pub fn read_all(&self) -> Result<HistoryLog, StorageError> {
        let Some(content) = ledger::read_locked(&self.path)? else {
            return Ok(HistoryLog::default());
        };
        let (entries, malformed) =
            ledger::parse_lines(&self.path, &content, AdjustmentEntry::from_str);
        Ok(HistoryLog { entries, malformed })
    }

    /// Multiplier set by the most recent entry, if any.
    pub fn latest_multiplier(&self) -> Result<Option<CalibrationMultiplier>, StorageError> {
        Ok(self.read_all()?.entries.last().map(|e| e.applied))
    }
}
