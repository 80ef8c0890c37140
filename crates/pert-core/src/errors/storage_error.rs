//! Outcome log and history log errors.

use super::error_code::{self, PertErrorCode};

/// Errors from the append-only logs.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to lock {path}: {source}")]
    LockFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize record: {message}")]
    Serialize { message: String },
}

impl PertErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } | Self::Serialize { .. } => error_code::STORAGE_ERROR,
            Self::LockFailed { .. } => error_code::LOCK_FAILED,
        }
    }
}

/// A single log line that could not be parsed.
///
/// Non-fatal: the line is skipped and returned alongside the records that
/// did load. Never raised as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// 1-based line number in the log file.
    pub line: usize,
    /// Parser message.
    pub message: String,
}

impl std::fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed record at line {}: {}", self.line, self.message)
    }
}
