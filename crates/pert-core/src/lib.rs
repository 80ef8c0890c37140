//! # pert-core
//!
//! Foundation crate for the PERT risk confidence engine.
//! Defines the data model, errors, config, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{EngineConfig, PertConfig};
pub use errors::{AssessmentError, ConfigError, EstimateError, PertErrorCode, StorageError};
pub use types::{
    ActualOutcome, AssessmentResult, CalibrationMultiplier, FactorBreakdown, FactorInputs,
    FactorKey, ImpactLevel, OutcomeRecord, PhaseConfidence, RiskFactorScore, ThreePointEstimate,
    WeightProfile,
};
