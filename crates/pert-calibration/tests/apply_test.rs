//! Tests for applying recommendations and the full feedback loop.

use pert_calibration::*;
use pert_core::config::PertConfig;
use pert_core::errors::error_code::{self, PertErrorCode};
use pert_core::types::*;
use pert_engine::{ConfidenceEngine, PhaseInput, PlanInput};
use pert_storage::{JsonlOutcomeStore, MultiplierHistory, OutcomeStore};

fn overconfident_records() -> Vec<OutcomeRecord> {
    (0..10)
        .map(|i| {
            let outcome = if i < 7 {
                ActualOutcome::Success
            } else {
                ActualOutcome::Failure
            };
            OutcomeRecord::new("plans/p.md", format!("Plan {i}"), outcome)
                .with_predicted_confidence(Some(90.0))
        })
        .collect()
}

#[test]
fn apply_records_history_and_returns_new_config() {
    let dir = tempfile::tempdir().unwrap();
    let history = MultiplierHistory::new(dir.path().join("multiplier-history.txt"));
    let config = PertConfig::default();

    let analyzer = CalibrationAnalyzer::new();
    let stats = analyzer.analyze(&overconfident_records());
    let rec = analyzer.recommend(&stats, CalibrationMultiplier::default());

    let applied = apply_recommendation(&rec, &config, &history).unwrap();
    assert!((applied.config.scoring.effective_multiplier() - 2.4).abs() < 1e-9);
    assert_eq!(applied.entry.previous, CalibrationMultiplier::default());
    assert_eq!(applied.entry.calibration_error, 20.0);

    let engine = applied.engine_config(ImpactLevel::default()).unwrap();
    assert_eq!(engine.multiplier(), rec.recommended);
    assert_eq!(engine.threshold(), 85.0);

    assert_eq!(history.latest_multiplier().unwrap(), Some(rec.recommended));
    // The caller's configuration is untouched.
    assert_eq!(config.scoring.confidence_multiplier, None);
}

#[test]
fn unchanged_recommendation_is_not_applied() {
    let dir = tempfile::tempdir().unwrap();
    let history = MultiplierHistory::new(dir.path().join("multiplier-history.txt"));

    let analyzer = CalibrationAnalyzer::new();
    let stats = analyzer.analyze(&overconfident_records()[..3]);
    let rec = analyzer.recommend(&stats, CalibrationMultiplier::default());

    let err = apply_recommendation(&rec, &PertConfig::default(), &history).unwrap_err();
    assert_eq!(err.error_code(), error_code::NOTHING_TO_APPLY);
    assert!(err.to_string().contains("Insufficient data"));
    assert!(!history.path().exists());
}

#[test]
fn stale_recommendation_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let history = MultiplierHistory::new(dir.path().join("multiplier-history.txt"));
    let config = PertConfig::from_toml("[scoring]\nconfidence_multiplier = 2.2\n").unwrap();

    let analyzer = CalibrationAnalyzer::new();
    let stats = analyzer.analyze(&overconfident_records());
    let rec = analyzer.recommend(&stats, CalibrationMultiplier::default());

    let err = apply_recommendation(&rec, &config, &history).unwrap_err();
    assert!(matches!(err, CalibrationError::StaleRecommendation { .. }));
    assert!(!history.path().exists());
}

#[test]
fn applied_config_round_trips_through_toml() {
    let dir = tempfile::tempdir().unwrap();
    let history = MultiplierHistory::new(dir.path().join("multiplier-history.txt"));
    let analyzer = CalibrationAnalyzer::new();
    let stats = analyzer.analyze(&overconfident_records());
    let rec = analyzer.recommend(&stats, CalibrationMultiplier::default());
    let applied = apply_recommendation(&rec, &PertConfig::default(), &history).unwrap();

    let path = dir.path().join("pert.toml");
    applied.config.save(&path).unwrap();
    let reloaded = PertConfig::from_toml(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        reloaded.scoring.effective_multiplier(),
        applied.config.scoring.effective_multiplier()
    );
}

fn phase(name: &str, complexity: (f64, f64, f64)) -> PhaseInput {
    let (o, mo, p) = complexity;
    PhaseInput {
        name: name.into(),
        risk_factors: FactorInputs::new()
            .with(FactorKey::Complexity, ThreePointEstimate::new(o, mo, p).unwrap())
            .with(FactorKey::Dependencies, ThreePointEstimate::new(0.0, 1.0, 3.0).unwrap())
            .with(FactorKey::Testing, ThreePointEstimate::new(0.0, 2.0, 4.0).unwrap()),
    }
}

#[test]
fn feedback_loop_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = PertConfig::default();
    let store = JsonlOutcomeStore::new(config.outcomes_path(dir.path()));
    let history = MultiplierHistory::new(config.history_path(dir.path()));
    let engine = ConfidenceEngine::new();

    let plan = PlanInput {
        plan_name: "Search index".into(),
        impact_level: ImpactLevel::new(2).unwrap(),
        phases: vec![phase("Phase 1", (0.0, 2.0, 5.0)), phase("Phase 2", (2.0, 4.0, 8.0))],
    };
    let engine_config = config.engine_config(plan.impact_level).unwrap();
    let assessment = engine.assess_plan(&plan, &engine_config);
    assert!(assessment.all_passed());

    // The same confident plan keeps failing half the time.
    for i in 0..10 {
        let outcome = if i % 2 == 0 {
            ActualOutcome::Success
        } else {
            ActualOutcome::Failure
        };
        store
            .append(&assessment.to_outcome_record(format!("plans/run-{i}.md"), outcome))
            .unwrap();
    }

    let report = CalibrationAnalyzer::new()
        .run(&store, engine_config.multiplier())
        .unwrap();
    assert!(report.stats.is_overconfident);
    assert!(report.recommendation.is_change());

    let applied = apply_recommendation(&report.recommendation, &config, &history).unwrap();
    let widened = applied.engine_config(plan.impact_level).unwrap();
    assert!(widened.multiplier() > engine_config.multiplier());

    let reassessed = engine.assess_plan(&plan, &widened);
    assert!(
        reassessed.predicted_confidence().unwrap() < assessment.predicted_confidence().unwrap()
    );
}
