//! # pert-calibration
//!
//! Compares recorded outcomes against their predictions, measures systematic
//! bias, and proposes a bounded change to the confidence multiplier.
//!
//! Analysis and recommendation are advisory. The multiplier only changes
//! through [`apply::apply_recommendation`], an explicit operator action.

pub mod analyzer;
pub mod apply;
pub mod errors;
pub mod recommend;
pub mod stats;

pub use analyzer::{CalibrationAnalyzer, CalibrationReport, CalibrationSettings};
pub use apply::{apply_recommendation, AppliedAdjustment};
pub use errors::CalibrationError;
pub use recommend::{AdjustmentDirection, Recommendation, RecommendationKind};
pub use stats::{BucketStats, CalibrationStats, OutcomeCounts, SampleAdequacy};
