//! Shared constants for the PERT risk confidence engine.

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---- Estimates ----

/// Lowest permitted risk value for any point of a three-point estimate.
pub const MIN_RISK: f64 = 0.0;

/// Highest permitted risk value for any point of a three-point estimate.
pub const MAX_RISK: f64 = 100.0;

/// Factor standard deviation above which a factor is a mitigation priority.
pub const HIGH_VARIANCE_SD: f64 = 15.0;

// ---- Engine ----

/// Default confidence-interval multiplier (±2 SD).
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Lower bound for the confidence-interval multiplier.
pub const MIN_MULTIPLIER: f64 = 1.5;

/// Upper bound for the confidence-interval multiplier.
pub const MAX_MULTIPLIER: f64 = 3.0;

/// Confident-success threshold for impact levels 2-5.
pub const DEFAULT_THRESHOLD: f64 = 85.0;

/// Confident-success threshold for impact level 1 (throwaway work).
pub const LOW_IMPACT_THRESHOLD: f64 = 75.0;

// ---- Outcomes ----

/// Lowest confident success the engine can produce: every FULL factor at
/// maximum spread under the widest multiplier (5 × 100/6 × 3.0).
pub const MIN_CONFIDENT_SUCCESS: f64 = -250.0;

/// Highest confident success the engine can produce.
pub const MAX_CONFIDENT_SUCCESS: f64 = MAX_RISK;

// ---- Calibration ----

/// Default confidence bucket width in percentage points.
pub const DEFAULT_BUCKET_WIDTH: u32 = 2;

/// Minimum number of recorded outcomes before a recommendation is made.
pub const MIN_SAMPLE_SIZE: usize = 5;

/// Sample size at which calibration is considered robust.
pub const ROBUST_SAMPLE_SIZE: usize = 20;

/// Calibration error band (percentage points) treated as well-calibrated.
pub const CALIBRATION_TOLERANCE: f64 = 2.0;

/// Divisor applied to the calibration error when sizing a multiplier step.
pub const ADJUSTMENT_ERROR_DIVISOR: f64 = 2.5;

/// Scale applied after the divisor when sizing a multiplier step.
pub const ADJUSTMENT_STEP_SCALE: f64 = 0.05;

// ---- Storage ----

/// Default outcome log file name.
pub const DEFAULT_OUTCOMES_FILE: &str = "outcomes.jsonl";

/// Default multiplier history file name.
pub const DEFAULT_HISTORY_FILE: &str = "multiplier-history.txt";

/// Default calibration directory, relative to the project root.
pub const DEFAULT_CALIBRATION_DIR: &str = ".calibration";
