//! Structured event names shared by every crate in the workspace.
//!
//! Emitted as the `event` field so logs can be filtered per operation.

/// Engine: one factor set evaluated.
pub const ASSESSMENT_EVALUATED: &str = "assessment_evaluated";

/// Engine: evaluation rejected because required factors were absent.
pub const ASSESSMENT_REJECTED: &str = "assessment_rejected";

/// Engine: every phase of a plan evaluated.
pub const PLAN_EVALUATED: &str = "plan_evaluated";

/// Storage: one outcome record appended.
pub const OUTCOME_APPENDED: &str = "outcome_appended";

/// Storage: outcome log read back.
pub const OUTCOMES_LOADED: &str = "outcomes_loaded";

/// Storage: a line in a log could not be parsed and was skipped.
pub const RECORD_SKIPPED: &str = "record_skipped";

/// Storage: multiplier change recorded.
pub const ADJUSTMENT_RECORDED: &str = "adjustment_recorded";

/// Calibration: statistics computed over the outcome log.
pub const CALIBRATION_ANALYZED: &str = "calibration_analyzed";

/// Calibration: multiplier recommendation produced.
pub const RECOMMENDATION_MADE: &str = "recommendation_made";

/// Calibration: recommended multiplier applied.
pub const RECOMMENDATION_APPLIED: &str = "recommendation_applied";

/// Config: all layers resolved and validated.
pub const CONFIG_LOADED: &str = "config_loaded";
