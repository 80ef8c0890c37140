//! Data model shared by the engine, the outcome store, and calibration.

pub mod assessment;
pub mod estimate;
pub mod factor;
pub mod impact;
pub mod multiplier;
pub mod outcome;
pub mod profile;

pub use assessment::{AssessmentResult, FactorBreakdown, RiskFactorScore};
pub use estimate::{RawEstimate, ThreePointEstimate};
pub use factor::{FactorInputs, FactorKey};
pub use impact::ImpactLevel;
pub use multiplier::CalibrationMultiplier;
pub use outcome::{is_reachable_confidence, ActualOutcome, OutcomeRecord, PhaseConfidence};
pub use profile::WeightProfile;
