//! Error handling for the PERT engine.
//! One error enum per subsystem, `thiserror` only.

pub mod assessment_error;
pub mod config_error;
pub mod error_code;
pub mod estimate_error;
pub mod storage_error;

pub use assessment_error::AssessmentError;
pub use config_error::ConfigError;
pub use error_code::PertErrorCode;
pub use estimate_error::EstimateError;
pub use storage_error::{MalformedRecord, StorageError};
