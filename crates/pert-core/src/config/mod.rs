//! Configuration system for the PERT engine.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod calibration_config;
pub mod engine_config;
pub mod pert_config;
pub mod scoring_config;
pub mod storage_config;

pub use calibration_config::CalibrationConfig;
pub use engine_config::EngineConfig;
pub use pert_config::{ConfigOverrides, PertConfig};
pub use scoring_config::ScoringConfig;
pub use storage_config::StorageConfig;
