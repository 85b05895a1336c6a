use alignment_engine::scoring::{build_breakdown, compute_alignment_score, risk_score};

#[test]
fn given_penalty_sets_when_compute_alignment_score_then_bounded() {
    assert_eq!(compute_alignment_score(&[200.0]), 0.0);
    assert_eq!(compute_alignment_score(&[-20.0]), 100.0);
    assert_eq!(compute_alignment_score(&[10.0, 15.0]), 75.0);
    assert_eq!(compute_alignment_score(&[]), 100.0);
}

#[test]
fn given_alignment_when_risk_score_then_complement() {
    assert_eq!(risk_score(75.0), 25.0);
    assert_eq!(risk_score(0.0), 100.0);
}

#[test]
fn given_growing_rule_count_when_build_breakdown_then_risk_penalty_never_decreases() {
    let penalties: Vec<f64> = (0..=6)
        .map(|count| build_breakdown(0.3, count, 0).risk_penalty)
        .collect();

    for pair in penalties.windows(2) {
        assert!(pair[1] >= pair[0], "{penalties:?}");
    }
    assert_eq!(penalties[..5], [0.0, 6.0, 12.0, 18.0, 24.0]);
    assert_eq!(penalties[5], 25.0);
    assert_eq!(penalties[6], 25.0);
}

#[test]
fn given_missing_signals_when_build_breakdown_then_uncertainty_capped() {
    assert_eq!(build_breakdown(0.0, 0, 3).uncertainty_penalty, 6.0);
    assert_eq!(build_breakdown(0.0, 0, 6).uncertainty_penalty, 10.0);
}

#[test]
fn given_priority_when_build_breakdown_then_priority_penalties_scale_together() {
    let breakdown = build_breakdown(0.5, 0, 0);

    assert_eq!(breakdown.goal_adherence_penalty, 17.5);
    assert_eq!(breakdown.recovery_risk_penalty, 10.0);
    assert_eq!(breakdown.stability_penalty, 5.0);
    assert_eq!(breakdown.total(), 32.5);
    assert_eq!(compute_alignment_score(&breakdown.penalties()), 67.5);

    let saturated = build_breakdown(4.0, 10, 10);
    assert_eq!(compute_alignment_score(&saturated.penalties()), 0.0);
}
