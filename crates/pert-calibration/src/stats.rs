//! Calibration statistics over the outcome log.

use serde::Serialize;

/// Predictions and outcomes for one predicted-confidence bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketStats {
    /// e.g. `"94-96%"`.
    pub label: String,
    /// Inclusive lower edge.
    pub lower: i64,
    /// Exclusive upper edge.
    pub upper: i64,
    pub count: usize,
    pub predicted_avg: f64,
    pub actual_rate: f64,
    /// `predicted_avg - actual_rate`; positive means overconfident.
    pub calibration_error: f64,
}

/// Records per actual outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub success: usize,
    pub partial: usize,
    pub failure: usize,
}

/// How much weight the sample can bear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleAdequacy {
    /// Below the minimum; no recommendation is made.
    Insufficient,
    /// Enough to recommend, with wide uncertainty.
    Minimal,
    Good,
}

/// Aggregate and bucketed calibration statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationStats {
    /// Every loaded record, with or without a prediction.
    pub total_records: usize,
    /// Records carrying a predicted confidence.
    pub predicted_records: usize,
    /// Mean over records with a prediction; 0 when there are none.
    pub mean_predicted: f64,
    /// Success rate over all records (SUCCESS = 100, otherwise 0).
    pub mean_actual: f64,
    /// `mean_predicted - mean_actual`.
    pub mean_error: f64,
    /// Ordered by lower edge.
    pub buckets: Vec<BucketStats>,
    pub outcomes: OutcomeCounts,
    pub is_overconfident: bool,
    pub is_underconfident: bool,
    pub adequacy: SampleAdequacy,
}

impl CalibrationStats {
    pub fn is_well_calibrated(&self) -> bool {
        !self.is_overconfident && !self.is_underconfident
    }
}
