use alignment_engine::insights::{
    DEFAULT_MIN_POINTS, STAGNATION_VERSION, Severity, detect_stagnation_alerts,
};
use time::macros::date;

use crate::runs_with_signals;

fn alert_types(runs: &[alignment_engine::decision::record::DecisionRecord]) -> Vec<String> {
    detect_stagnation_alerts(runs, DEFAULT_MIN_POINTS, date!(2026 - 03 - 28))
        .into_iter()
        .map(|alert| alert.alert_type)
        .collect()
}

#[test]
fn given_flat_trend_when_detect_then_trend_alert_raised() {
    let runs = runs_with_signals(&[("trend_slope", &[0.005, -0.004, 0.002, 0.001, -0.003])]);

    let alerts = detect_stagnation_alerts(&runs, DEFAULT_MIN_POINTS, date!(2026 - 03 - 28));

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].alert_id, "stagnation_weight_trend");
    assert_eq!(alerts[0].severity, Severity::Medium);
    assert_eq!(alerts[0].triggered_at, date!(2026 - 03 - 28));
    assert_eq!(alerts[0].version, STAGNATION_VERSION);
}

#[test]
fn given_too_few_points_when_detect_then_no_trend_alert() {
    let runs = runs_with_signals(&[("trend_slope", &[0.0, 0.0, 0.0, 0.0])]);
    assert!(alert_types(&runs).is_empty());
}

#[test]
fn given_moving_trend_when_detect_then_no_alert() {
    let runs = runs_with_signals(&[("trend_slope", &[-0.08, -0.07, -0.09, -0.06, -0.08])]);
    assert!(alert_types(&runs).is_empty());
}

#[test]
fn given_several_patterns_when_detect_then_sorted_by_severity_then_type() {
    let runs = runs_with_signals(&[
        ("compliance_ratio", &[0.92, 0.9, 0.86, 0.84, 0.8]),
        ("recovery_index", &[0.7, 0.6, 0.45, 0.42, 0.4]),
        ("progressive_overload_score", &[0.5, 0.6, 0.61, 0.6, 0.62]),
    ]);

    assert_eq!(
        alert_types(&runs),
        vec!["compliance_drift", "persistent_low_recovery", "overload_flatline"]
    );
}

#[test]
fn given_small_compliance_dip_when_detect_then_no_drift_alert() {
    let runs = runs_with_signals(&[("compliance_ratio", &[0.9, 0.88, 0.87, 0.86, 0.85])]);
    assert!(alert_types(&runs).is_empty());
}
