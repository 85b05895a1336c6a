use alignment_engine::{
    context::CONTEXT_VERSION,
    engine::run_decision,
    governance::{diff_runs, summarize_history},
};

use crate::support::{
    health_domain, luteal_request, persisted_runs, request, sample_logs, settings,
};

#[test]
fn given_runs_when_summarize_history_then_trends_follow_input_order() {
    let runs = persisted_runs(4);

    let summary = summarize_history(&runs);

    assert_eq!(summary.count, 4);
    let alignment: Vec<f64> = runs.iter().map(|run| run.result.alignment_score).collect();
    assert_eq!(summary.alignment_trend, alignment);
    assert_eq!(summary.confidence_trend.len(), 4);
    assert_eq!(summary.context_application_frequency, 0.0);
    assert_eq!(summary.determinism_pass_rate, 0.0);
    let triggered: usize = runs
        .iter()
        .map(|run| run.result.trace.triggered_rules.len())
        .sum();
    assert_eq!(
        summary.rule_trigger_distribution.values().sum::<usize>(),
        triggered
    );
}

#[test]
fn given_no_runs_when_summarize_history_then_zeroed() {
    let summary = summarize_history(&[]);
    assert_eq!(summary.count, 0);
    assert!(summary.alignment_trend.is_empty());
    assert_eq!(summary.determinism_pass_rate, 0.0);
}

#[test]
fn given_context_added_when_diff_runs_then_changes_reported() {
    let domain = health_domain();
    let plain = run_decision(&domain, &request("general_health", sample_logs(2)), &[], &settings())
        .expect("plain run")
        .into_record("plain");
    let cycled = run_decision(
        &domain,
        &luteal_request("general_health", sample_logs(2)),
        &[],
        &settings(),
    )
    .expect("luteal run")
    .into_record("cycled");

    let diff = diff_runs(&plain, &cycled);

    assert!(!diff.context_changes.context_applied_from);
    assert!(diff.context_changes.context_applied_to);
    assert_eq!(diff.context_changes.context_version_to, CONTEXT_VERSION);
    let expected = cycled.result.alignment_score - plain.result.alignment_score;
    assert!((diff.score_delta.alignment_score_delta - expected).abs() < 1e-4);
}

#[test]
fn given_same_run_when_diff_runs_then_empty_changes() {
    let runs = persisted_runs(1);

    let diff = diff_runs(&runs[0], &runs[0]);

    assert_eq!(diff.score_delta.alignment_score_delta, 0.0);
    assert!(diff.recommendation_changes.added.is_empty());
    assert!(diff.recommendation_changes.removed.is_empty());
    assert!(diff.recommendation_changes.rank_shifts.is_empty());
}
