//! Top-level PERT configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{CalibrationConfig, EngineConfig, ScoringConfig, StorageConfig};
use crate::constants::{MAX_MULTIPLIER, MIN_MULTIPLIER};
use crate::errors::ConfigError;
use crate::types::{CalibrationMultiplier, ImpactLevel};

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "pert.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`PERT_*`)
/// 3. Project config (`pert.toml` in project root)
/// 4. User config (`~/.pert/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PertConfig {
    pub scoring: ScoringConfig,
    pub calibration: CalibrationConfig,
    pub storage: StorageConfig,
}

/// Override arguments that take precedence over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub confidence_multiplier: Option<f64>,
    pub threshold: Option<f64>,
    pub outcomes_path: Option<String>,
    pub history_path: Option<String>,
}

impl PertConfig {
    /// Load configuration with 4-layer resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): explicit overrides
        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;

        tracing::debug!(
            event = crate::tracing::events::CONFIG_LOADED,
            root = %root.display(),
            multiplier = config.scoring.effective_multiplier(),
            threshold = config.scoring.effective_threshold(),
        );

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &PertConfig) -> Result<(), ConfigError> {
        if let Some(m) = config.scoring.confidence_multiplier {
            if !m.is_finite() || !(MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&m) {
                return Err(ConfigError::ValidationFailed {
                    field: "scoring.confidence_multiplier".to_string(),
                    message: format!("must be between {MIN_MULTIPLIER} and {MAX_MULTIPLIER}"),
                });
            }
        }
        for (field, value) in [
            ("scoring.threshold", config.scoring.threshold),
            (
                "scoring.low_impact_threshold",
                config.scoring.low_impact_threshold,
            ),
        ] {
            if let Some(t) = value {
                if !t.is_finite() || !(0.0..=100.0).contains(&t) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be between 0 and 100".to_string(),
                    });
                }
            }
        }
        if config.calibration.bucket_width == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "calibration.bucket_width".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.calibration.min_sample_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "calibration.min_sample_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(t) = config.calibration.tolerance {
            if !t.is_finite() || t < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "calibration.tolerance".to_string(),
                    message: "must be a non-negative number".to_string(),
                });
            }
        }
        for (field, value) in [
            ("calibration.error_divisor", config.calibration.error_divisor),
            ("calibration.step_scale", config.calibration.step_scale),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be greater than 0".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Resolve the immutable engine configuration for an impact level.
    ///
    /// Impact 1 uses the low-impact threshold, everything else the standard one.
    pub fn engine_config(&self, impact: ImpactLevel) -> Result<EngineConfig, ConfigError> {
        let multiplier = CalibrationMultiplier::new(self.scoring.effective_multiplier())?;
        let threshold = if impact.is_throwaway() {
            self.scoring.effective_low_impact_threshold()
        } else {
            self.scoring.effective_threshold()
        };
        EngineConfig::new(multiplier, threshold)
    }

    /// Copy of this configuration with the multiplier replaced.
    pub fn with_multiplier(&self, multiplier: CalibrationMultiplier) -> Self {
        let mut next = self.clone();
        next.scoring.confidence_multiplier = Some(multiplier.value());
        next
    }

    pub fn outcomes_path(&self, root: &Path) -> PathBuf {
        self.storage.effective_outcomes_path(root)
    }

    pub fn history_path(&self, root: &Path) -> PathBuf {
        self.storage.effective_history_path(root)
    }

    /// Returns the user config path: `~/.pert/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut PertConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PertConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut PertConfig, other: &PertConfig) {
        // Scoring
        if other.scoring.confidence_multiplier.is_some() {
            base.scoring.confidence_multiplier = other.scoring.confidence_multiplier;
        }
        if other.scoring.threshold.is_some() {
            base.scoring.threshold = other.scoring.threshold;
        }
        if other.scoring.low_impact_threshold.is_some() {
            base.scoring.low_impact_threshold = other.scoring.low_impact_threshold;
        }

        // Calibration
        if other.calibration.bucket_width.is_some() {
            base.calibration.bucket_width = other.calibration.bucket_width;
        }
        if other.calibration.min_sample_size.is_some() {
            base.calibration.min_sample_size = other.calibration.min_sample_size;
        }
        if other.calibration.tolerance.is_some() {
            base.calibration.tolerance = other.calibration.tolerance;
        }
        if other.calibration.error_divisor.is_some() {
            base.calibration.error_divisor = other.calibration.error_divisor;
        }
        if other.calibration.step_scale.is_some() {
            base.calibration.step_scale = other.calibration.step_scale;
        }

        // Storage
        if other.storage.calibration_dir.is_some() {
            base.storage.calibration_dir = other.storage.calibration_dir.clone();
        }
        if other.storage.outcomes_path.is_some() {
            base.storage.outcomes_path = other.storage.outcomes_path.clone();
        }
        if other.storage.history_path.is_some() {
            base.storage.history_path = other.storage.history_path.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `PERT_CONFIDENCE_MULTIPLIER`, `PERT_CALIBRATION_BUCKET_WIDTH`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut PertConfig) {
        if let Ok(val) = std::env::var("PERT_CONFIDENCE_MULTIPLIER") {
            if let Ok(v) = val.parse::<f64>() {
                config.scoring.confidence_multiplier = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PERT_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.scoring.threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PERT_LOW_IMPACT_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.scoring.low_impact_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PERT_CALIBRATION_BUCKET_WIDTH") {
            if let Ok(v) = val.parse::<u32>() {
                config.calibration.bucket_width = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PERT_CALIBRATION_MIN_SAMPLE_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.calibration.min_sample_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PERT_CALIBRATION_TOLERANCE") {
            if let Ok(v) = val.parse::<f64>() {
                config.calibration.tolerance = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PERT_CALIBRATION_ERROR_DIVISOR") {
            if let Ok(v) = val.parse::<f64>() {
                config.calibration.error_divisor = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PERT_CALIBRATION_STEP_SCALE") {
            if let Ok(v) = val.parse::<f64>() {
                config.calibration.step_scale = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PERT_CALIBRATION_DIR") {
            config.storage.calibration_dir = Some(val);
        }
        if let Ok(val) = std::env::var("PERT_OUTCOMES_PATH") {
            config.storage.outcomes_path = Some(val);
        }
        if let Ok(val) = std::env::var("PERT_HISTORY_PATH") {
            config.storage.history_path = Some(val);
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut PertConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.confidence_multiplier {
            config.scoring.confidence_multiplier = Some(v);
        }
        if let Some(v) = overrides.threshold {
            config.scoring.threshold = Some(v);
        }
        if let Some(ref v) = overrides.outcomes_path {
            config.storage.outcomes_path = Some(v.clone());
        }
        if let Some(ref v) = overrides.history_path {
            config.storage.history_path = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Write the config to `path` as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFailed {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level config directory: `~/.pert/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".pert"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
