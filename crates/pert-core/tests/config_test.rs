//! Tests for layered configuration resolution.

use std::sync::Mutex;

use pert_core::config::{ConfigOverrides, PertConfig};
use pert_core::errors::ConfigError;
use pert_core::types::{CalibrationMultiplier, ImpactLevel};

/// Serializes tests that touch process environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const PERT_VARS: &[&str] = &[
    "PERT_CONFIDENCE_MULTIPLIER",
    "PERT_THRESHOLD",
    "PERT_LOW_IMPACT_THRESHOLD",
    "PERT_CALIBRATION_BUCKET_WIDTH",
    "PERT_CALIBRATION_MIN_SAMPLE_SIZE",
    "PERT_CALIBRATION_TOLERANCE",
    "PERT_CALIBRATION_ERROR_DIVISOR",
    "PERT_CALIBRATION_STEP_SCALE",
    "PERT_CALIBRATION_DIR",
    "PERT_OUTCOMES_PATH",
    "PERT_HISTORY_PATH",
];

/// Point HOME at an empty directory and clear every `PERT_*` variable.
fn isolated_env(home: &std::path::Path) {
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
    for var in PERT_VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn empty_toml_yields_compiled_defaults() {
    let config = PertConfig::from_toml("").unwrap();

    assert_eq!(config.scoring.effective_multiplier(), 2.0);
    assert_eq!(config.scoring.effective_threshold(), 85.0);
    assert_eq!(config.scoring.effective_low_impact_threshold(), 75.0);
    assert_eq!(config.calibration.effective_bucket_width(), 2);
    assert_eq!(config.calibration.effective_min_sample_size(), 5);
    assert_eq!(config.calibration.effective_tolerance(), 2.0);
    assert_eq!(config.calibration.effective_error_divisor(), 2.5);
    assert_eq!(config.calibration.effective_step_scale(), 0.05);
}

#[test]
fn partial_toml_keeps_defaults_for_missing_fields() {
    let toml = r#"
[scoring]
confidence_multiplier = 2.4

[calibration]
bucket_width = 5
"#;
    let config = PertConfig::from_toml(toml).unwrap();
    assert_eq!(config.scoring.effective_multiplier(), 2.4);
    assert_eq!(config.scoring.effective_threshold(), 85.0);
    assert_eq!(config.calibration.effective_bucket_width(), 5);
    assert_eq!(config.calibration.effective_min_sample_size(), 5);
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = PertConfig::from_toml("[scoring\nthreshold = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn storage_paths_resolve_against_root() {
    let root = std::path::Path::new("/work/project");
    let config = PertConfig::default();
    assert_eq!(
        config.outcomes_path(root),
        root.join(".calibration").join("outcomes.jsonl")
    );
    assert_eq!(
        config.history_path(root),
        root.join(".calibration").join("multiplier-history.txt")
    );

    let config = PertConfig::from_toml(
        r#"
[storage]
calibration_dir = "data"
history_path = "logs/history.txt"
"#,
    )
    .unwrap();
    assert_eq!(
        config.outcomes_path(root),
        root.join("data").join("outcomes.jsonl")
    );
    assert_eq!(config.history_path(root), root.join("logs/history.txt"));
}

#[test]
fn validation_rejects_out_of_bounds_multiplier() {
    let config = PertConfig::from_toml("[scoring]\nconfidence_multiplier = 3.5\n").unwrap();
    let err = PertConfig::validate(&config).unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "scoring.confidence_multiplier")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn validation_rejects_zero_bucket_width_and_bad_threshold() {
    let config = PertConfig::from_toml("[calibration]\nbucket_width = 0\n").unwrap();
    assert!(PertConfig::validate(&config).is_err());

    let config = PertConfig::from_toml("[scoring]\nthreshold = 120.0\n").unwrap();
    assert!(PertConfig::validate(&config).is_err());

    let config = PertConfig::from_toml("[calibration]\nerror_divisor = 0.0\n").unwrap();
    assert!(PertConfig::validate(&config).is_err());
}

#[test]
fn engine_config_uses_low_impact_threshold_for_level_one() {
    let config = PertConfig::default();

    let throwaway = config.engine_config(ImpactLevel::new(1).unwrap()).unwrap();
    assert_eq!(throwaway.threshold(), 75.0);
    assert_eq!(throwaway.multiplier().value(), 2.0);

    for level in 2..=5 {
        let engine = config.engine_config(ImpactLevel::new(level).unwrap()).unwrap();
        assert_eq!(engine.threshold(), 85.0);
    }
}

#[test]
fn with_multiplier_replaces_only_the_multiplier() {
    let config = PertConfig::from_toml("[scoring]\nthreshold = 90.0\n").unwrap();
    let next = config.with_multiplier(CalibrationMultiplier::new(2.4).unwrap());
    assert_eq!(next.scoring.effective_multiplier(), 2.4);
    assert_eq!(next.scoring.effective_threshold(), 90.0);
    assert_eq!(config.scoring.effective_multiplier(), 2.0);
}

#[test]
fn load_without_any_files_gives_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    isolated_env(home.path());

    let config = PertConfig::load(root.path(), None).unwrap();
    assert_eq!(config.scoring.effective_multiplier(), 2.0);
    assert_eq!(config.scoring.effective_threshold(), 85.0);
}

#[test]
fn load_layers_user_project_env_and_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    isolated_env(home.path());

    // User layer sets everything it can.
    std::fs::create_dir_all(home.path().join(".pert")).unwrap();
    std::fs::write(
        home.path().join(".pert").join("config.toml"),
        r#"
[scoring]
confidence_multiplier = 1.6
threshold = 80.0
low_impact_threshold = 70.0

[calibration]
bucket_width = 4
"#,
    )
    .unwrap();

    // Project layer overrides part of it.
    std::fs::write(
        root.path().join("pert.toml"),
        "[scoring]\nconfidence_multiplier = 1.8\nthreshold = 82.0\n",
    )
    .unwrap();

    // Env overrides the project for the multiplier.
    std::env::set_var("PERT_CONFIDENCE_MULTIPLIER", "2.2");

    // Explicit override wins over everything for the threshold.
    let overrides = ConfigOverrides {
        threshold: Some(88.0),
        ..Default::default()
    };

    let config = PertConfig::load(root.path(), Some(&overrides)).unwrap();
    std::env::remove_var("PERT_CONFIDENCE_MULTIPLIER");

    assert_eq!(config.scoring.effective_multiplier(), 2.2);
    assert_eq!(config.scoring.effective_threshold(), 88.0);
    assert_eq!(config.scoring.effective_low_impact_threshold(), 70.0);
    assert_eq!(config.calibration.effective_bucket_width(), 4);
}

#[test]
fn unparseable_env_value_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    isolated_env(home.path());

    std::env::set_var("PERT_CALIBRATION_BUCKET_WIDTH", "wide");
    let config = PertConfig::load(root.path(), None).unwrap();
    std::env::remove_var("PERT_CALIBRATION_BUCKET_WIDTH");

    assert_eq!(config.calibration.effective_bucket_width(), 2);
}

#[test]
fn env_sets_every_calibration_tunable() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    isolated_env(home.path());

    std::fs::write(
        root.path().join("pert.toml"),
        "[calibration]\ntolerance = 1.0\nerror_divisor = 4.0\nstep_scale = 0.2\n",
    )
    .unwrap();
    std::env::set_var("PERT_CALIBRATION_TOLERANCE", "3.5");
    std::env::set_var("PERT_CALIBRATION_ERROR_DIVISOR", "5.0");
    std::env::set_var("PERT_CALIBRATION_STEP_SCALE", "0.1");
    let loaded = PertConfig::load(root.path(), None);
    std::env::remove_var("PERT_CALIBRATION_TOLERANCE");
    std::env::remove_var("PERT_CALIBRATION_ERROR_DIVISOR");
    std::env::remove_var("PERT_CALIBRATION_STEP_SCALE");

    let config = loaded.unwrap();
    assert_eq!(config.calibration.effective_tolerance(), 3.5);
    assert_eq!(config.calibration.effective_error_divisor(), 5.0);
    assert_eq!(config.calibration.effective_step_scale(), 0.1);
}

#[test]
fn env_calibration_values_are_validated() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    isolated_env(home.path());

    std::env::set_var("PERT_CALIBRATION_ERROR_DIVISOR", "0");
    let loaded = PertConfig::load(root.path(), None);
    std::env::remove_var("PERT_CALIBRATION_ERROR_DIVISOR");

    assert!(matches!(
        loaded,
        Err(ConfigError::ValidationFailed { ref field, .. }) if field == "calibration.error_divisor"
    ));
}

#[test]
fn load_fails_validation_for_bad_project_value() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    isolated_env(home.path());

    std::fs::write(
        root.path().join("pert.toml"),
        "[scoring]\nconfidence_multiplier = 1.0\n",
    )
    .unwrap();
    let err = PertConfig::load(root.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn malformed_project_config_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    isolated_env(home.path());

    std::fs::write(root.path().join("pert.toml"), "not = [valid").unwrap();
    let err = PertConfig::load(root.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn save_then_load_preserves_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("pert.toml");

    let config = PertConfig::from_toml(
        r#"
[scoring]
confidence_multiplier = 2.4
low_impact_threshold = 72.5

[storage]
outcomes_path = "data/outcomes.jsonl"
"#,
    )
    .unwrap();
    config.save(&path).unwrap();

    let reloaded = PertConfig::from_toml(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(reloaded.scoring.effective_multiplier(), 2.4);
    assert_eq!(reloaded.scoring.effective_low_impact_threshold(), 72.5);
    assert_eq!(
        reloaded.storage.outcomes_path.as_deref(),
        Some("data/outcomes.jsonl")
    );
    assert_eq!(reloaded.scoring.threshold, None);
}
