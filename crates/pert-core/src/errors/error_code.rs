//! PertErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// that callers (CLI shells, report renderers) can match on.
pub trait PertErrorCode {
    /// Returns the error code string (e.g., "MISSING_FACTORS").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_ESTIMATE: &str = "INVALID_ESTIMATE";
pub const MISSING_FACTORS: &str = "MISSING_FACTORS";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const LOCK_FAILED: &str = "LOCK_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const NOTHING_TO_APPLY: &str = "NOTHING_TO_APPLY";
pub const STALE_RECOMMENDATION: &str = "STALE_RECOMMENDATION";
