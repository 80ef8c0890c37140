use std::collections::BTreeMap;

use pert_core::config::CalibrationConfig;
use pert_core::constants::{
    ADJUSTMENT_ERROR_DIVISOR, ADJUSTMENT_STEP_SCALE, CALIBRATION_TOLERANCE, DEFAULT_BUCKET_WIDTH,
    MIN_SAMPLE_SIZE, ROBUST_SAMPLE_SIZE,
};
use pert_core::errors::{MalformedRecord, StorageError};
use pert_core::tracing::events;
use pert_core::types::{ActualOutcome, CalibrationMultiplier, OutcomeRecord};
use pert_storage::OutcomeStore;

use crate::recommend::{self, Recommendation};
use crate::stats::{BucketStats, CalibrationStats, OutcomeCounts, SampleAdequacy};

/// Tunables for analysis and recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationSettings {
    /// Bucket width in percentage points.
    pub bucket_width: u32,
    /// Records required before any adjustment is recommended.
    pub min_sample_size: usize,
    /// Mean error magnitude below which the system counts as calibrated.
    pub tolerance: f64,
    pub error_divisor: f64,
    pub step_scale: f64,
}

impl CalibrationSettings {
    pub fn from_config(config: &CalibrationConfig) -> Self {
        Self {
            bucket_width: config.effective_bucket_width(),
            min_sample_size: config.effective_min_sample_size(),
            tolerance: config.effective_tolerance(),
            error_divisor: config.effective_error_divisor(),
            step_scale: config.effective_step_scale(),
        }
    }
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            bucket_width: DEFAULT_BUCKET_WIDTH,
            min_sample_size: MIN_SAMPLE_SIZE,
            tolerance: CALIBRATION_TOLERANCE,
            error_divisor: ADJUSTMENT_ERROR_DIVISOR,
            step_scale: ADJUSTMENT_STEP_SCALE,
        }
    }
}

/// Statistics and recommendation for one pass over an outcome store, with
/// the lines the store had to skip.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationReport {
    pub stats: CalibrationStats,
    pub recommendation: Recommendation,
    pub skipped: Vec<MalformedRecord>,
}

/// Calibration analyzer. Stateless apart from its settings.
#[derive(Debug, Clone, Default)]
pub struct CalibrationAnalyzer {
    settings: CalibrationSettings,
}

impl CalibrationAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CalibrationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CalibrationSettings {
        &self.settings
    }

    /// Compute aggregate and bucketed calibration statistics.
    ///
    /// Records without a prediction, or with one outside [-250, 100], are
    /// excluded from `mean_predicted` and the buckets but still count toward
    /// totals and `mean_actual`.
    pub fn analyze(&self, records: &[OutcomeRecord]) -> CalibrationStats {
        let mut outcomes = OutcomeCounts::default();
        for record in records {
            match record.actual_outcome {
                ActualOutcome::Success => outcomes.success += 1,
                ActualOutcome::Partial => outcomes.partial += 1,
                ActualOutcome::Failure => outcomes.failure += 1,
            }
        }

        let total_records = records.len();
        let predicted: Vec<(f64, &OutcomeRecord)> = records
            .iter()
            .filter_map(|r| r.usable_prediction().map(|c| (c, r)))
            .collect();
        let unreachable = records
            .iter()
            .filter(|r| r.predicted_confidence.is_some() && r.usable_prediction().is_none())
            .count();
        if unreachable > 0 {
            tracing::warn!(
                event = events::RECORD_SKIPPED,
                unreachable,
                "ignoring predictions outside the engine's output range"
            );
        }

        let mean_predicted = mean(predicted.iter().map(|(c, _)| *c)).unwrap_or(0.0);
        let mean_actual =
            mean(records.iter().map(|r| r.actual_outcome.success_value())).unwrap_or(0.0);
        let mean_error = mean_predicted - mean_actual;

        let buckets = self.bucketize(&predicted);

        let stats = CalibrationStats {
            total_records,
            predicted_records: predicted.len(),
            mean_predicted,
            mean_actual,
            mean_error,
            buckets,
            outcomes,
            is_overconfident: mean_error > self.settings.tolerance,
            is_underconfident: mean_error < -self.settings.tolerance,
            adequacy: self.adequacy(total_records),
        };

        tracing::debug!(
            event = events::CALIBRATION_ANALYZED,
            total_records,
            predicted_records = stats.predicted_records,
            mean_predicted,
            mean_actual,
            mean_error,
            buckets = stats.buckets.len(),
        );

        stats
    }

    /// Recommend a multiplier for `current` given `stats`. Advisory only.
    pub fn recommend(
        &self,
        stats: &CalibrationStats,
        current: CalibrationMultiplier,
    ) -> Recommendation {
        recommend::recommend(stats, current, &self.settings)
    }

    /// Load every record from `store`, analyze, and recommend.
    pub fn run<S: OutcomeStore + ?Sized>(
        &self,
        store: &S,
        current: CalibrationMultiplier,
    ) -> Result<CalibrationReport, StorageError> {
        let log = store.load_all()?;
        let stats = self.analyze(&log.records);
        let recommendation = self.recommend(&stats, current);
        Ok(CalibrationReport {
            stats,
            recommendation,
            skipped: log.malformed,
        })
    }

    fn bucketize(&self, predicted: &[(f64, &OutcomeRecord)]) -> Vec<BucketStats> {
        let width = i64::from(self.settings.bucket_width.max(1));
        let mut grouped: BTreeMap<i64, Vec<(f64, ActualOutcome)>> = BTreeMap::new();
        for (confidence, record) in predicted {
            let Some(lower) = bucket_floor(*confidence, width) else {
                continue;
            };
            grouped
                .entry(lower)
                .or_default()
                .push((*confidence, record.actual_outcome));
        }

        grouped
            .into_iter()
            .map(|(lower, members)| {
                let count = members.len();
                let predicted_avg = mean(members.iter().map(|(c, _)| *c)).unwrap_or(0.0);
                let actual_rate =
                    mean(members.iter().map(|(_, o)| o.success_value())).unwrap_or(0.0);
                let upper = lower.saturating_add(width);
                BucketStats {
                    label: format!("{lower}-{upper}%"),
                    lower,
                    upper,
                    count,
                    predicted_avg,
                    actual_rate,
                    calibration_error: predicted_avg - actual_rate,
                }
            })
            .collect()
    }

    fn adequacy(&self, total: usize) -> SampleAdequacy {
        if total < self.settings.min_sample_size {
            SampleAdequacy::Insufficient
        } else if total < ROBUST_SAMPLE_SIZE.max(self.settings.min_sample_size) {
            SampleAdequacy::Minimal
        } else {
            SampleAdequacy::Good
        }
    }
}

/// Lower edge of the bucket holding `confidence`, or `None` when it has no
/// representable edge.
fn bucket_floor(confidence: f64, width: i64) -> Option<i64> {
    let index = (confidence / width as f64).floor();
    if !index.is_finite() || index.abs() >= (i64::MAX / width) as f64 {
        return None;
    }
    (index as i64).checked_mul(width)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
