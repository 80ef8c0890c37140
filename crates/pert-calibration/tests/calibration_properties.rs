//! Property tests for calibration bounds and monotonicity.

use pert_calibration::*;
use pert_core::types::{ActualOutcome, CalibrationMultiplier, OutcomeRecord};
use proptest::prelude::*;

fn arb_record() -> impl Strategy<Value = OutcomeRecord> {
    (
        proptest::option::weighted(0.9, -20.0f64..=100.0),
        prop_oneof![
            Just(ActualOutcome::Success),
            Just(ActualOutcome::Partial),
            Just(ActualOutcome::Failure),
        ],
    )
        .prop_map(|(predicted, outcome)| {
            OutcomeRecord::new("p.md", "p", outcome).with_predicted_confidence(predicted)
        })
}

fn arb_multiplier() -> impl Strategy<Value = CalibrationMultiplier> {
    (1.5f64..=3.0).prop_map(|v| CalibrationMultiplier::new(v).unwrap())
}

proptest! {
    #[test]
    fn recommendation_stays_in_bounds(
        records in proptest::collection::vec(arb_record(), 0..60),
        current in arb_multiplier(),
    ) {
        let analyzer = CalibrationAnalyzer::new();
        let stats = analyzer.analyze(&records);
        let rec = analyzer.recommend(&stats, current);
        prop_assert!((1.5..=3.0).contains(&rec.recommended.value()));
        prop_assert_eq!(rec.current, current);
    }

    #[test]
    fn small_samples_never_change(
        records in proptest::collection::vec(arb_record(), 0..5),
        current in arb_multiplier(),
    ) {
        let analyzer = CalibrationAnalyzer::new();
        let rec = analyzer.recommend(&analyzer.analyze(&records), current);
        prop_assert!(!rec.is_change());
    }

    #[test]
    fn direction_follows_error_sign(
        records in proptest::collection::vec(arb_record(), 5..60),
        current in arb_multiplier(),
    ) {
        let analyzer = CalibrationAnalyzer::new();
        let stats = analyzer.analyze(&records);
        let rec = analyzer.recommend(&stats, current);
        if stats.mean_error >= 2.0 {
            prop_assert!(rec.recommended >= current);
        } else if stats.mean_error <= -2.0 {
            prop_assert!(rec.recommended <= current);
        } else {
            prop_assert!(!rec.is_change());
        }
    }

    #[test]
    fn analysis_is_repeatable(records in proptest::collection::vec(arb_record(), 0..60)) {
        let analyzer = CalibrationAnalyzer::new();
        prop_assert_eq!(analyzer.analyze(&records), analyzer.analyze(&records));
    }

    #[test]
    fn bucket_counts_cover_predicted_records(
        records in proptest::collection::vec(arb_record(), 0..60),
    ) {
        let stats = CalibrationAnalyzer::new().analyze(&records);
        let bucketed: usize = stats.buckets.iter().map(|b| b.count).sum();
        prop_assert_eq!(bucketed, stats.predicted_records);
        prop_assert_eq!(stats.total_records, records.len());
        for pair in stats.buckets.windows(2) {
            prop_assert!(pair[0].lower < pair[1].lower);
        }
    }
}
