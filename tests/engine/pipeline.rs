use std::collections::BTreeMap;

use alignment_engine::{
    context::ContextInput,
    decision::types::Thresholds,
    engine::{
        DomainDefinition, GoalStrategy, RunInputs, evaluate_and_decide, resolve_thresholds,
    },
    governance::canonical_hash,
    scoring::HistoryEntry,
    signals::SignalBundle,
    strategies::{GoalType, HealthStrategy},
};
use serde_json::json;

use crate::support::{health_domain, sample_logs};

fn run(
    strategy: &HealthStrategy,
    signals: &SignalBundle,
    target: &Thresholds,
    context: Option<&ContextInput>,
    history: &[HistoryEntry],
    previous_confidence: Option<f64>,
) -> alignment_engine::decision::record::DecisionResult {
    evaluate_and_decide(
        strategy,
        signals,
        RunInputs {
            target,
            context,
            history,
            previous_confidence,
            smoothing_alpha: 0.2,
            available_observations: 14,
            required_observations: 7,
            input_summary: json!({"case": "pipeline"}),
            engine_version: "v5",
        },
    )
}

fn signals() -> SignalBundle {
    let domain = health_domain();
    domain.compute_signals(&sample_logs(2), &domain.get_domain_config())
}

#[test]
fn given_fixed_inputs_when_run_twice_then_identical_hash() {
    let strategy = HealthStrategy::for_goal(GoalType::WeightLoss);
    let signals = signals();
    let history = vec![HistoryEntry {
        deviations: BTreeMap::from([("compliance_miss".to_string(), true)]),
    }];
    let context = ContextInput::phase("luteal");

    let first = run(&strategy, &signals, &Thresholds::new(), Some(&context), &history, Some(0.6));
    let second = run(&strategy, &signals, &Thresholds::new(), Some(&context), &history, Some(0.6));

    assert_eq!(
        canonical_hash(&first.output_payload().expect("payload")),
        canonical_hash(&second.output_payload().expect("payload"))
    );
    assert_eq!(first, second);
}

#[test]
fn given_every_goal_when_run_then_scores_and_confidences_bounded() {
    let signals = signals();
    for goal in GoalType::ALL {
        for missing in [false, true] {
            let bundle = if missing { SignalBundle::empty() } else { signals.clone() };
            let result = run(
                &HealthStrategy::for_goal(goal),
                &bundle,
                &Thresholds::new(),
                None,
                &[],
                None,
            );

            assert!((0.0..=100.0).contains(&result.alignment_score), "{goal}");
            assert!((result.risk_score - (100.0 - result.alignment_score)).abs() < 0.011);
            assert!((0.0..=1.0).contains(&result.alignment_confidence));
            for entry in &result.recommendation_confidence {
                assert!((0.0..=1.0).contains(&entry.confidence));
            }
            let priorities: Vec<u32> = result.recommendations.iter().map(|r| r.priority).collect();
            let expected: Vec<u32> = (1..=priorities.len() as u32).collect();
            assert_eq!(priorities, expected);
        }
    }
}

#[test]
fn given_no_signals_when_run_then_uncertainty_recorded_in_trace() {
    let result = run(
        &HealthStrategy::for_goal(GoalType::GeneralHealth),
        &SignalBundle::empty(),
        &Thresholds::new(),
        None,
        &[],
        None,
    );

    assert_eq!(result.trace.score_breakdown.uncertainty_penalty, 10.0);
    assert_eq!(
        result.trace.confidence_notes[0],
        "6 signal(s) missing; uncertainty penalty applied."
    );
    assert_eq!(result.trace.goal_strategy_applied, "general_health");
    assert!(result.trace.computed_signals.get("deviations").is_some());
    assert!(result.trace.governance.is_none());
}

#[test]
fn given_trace_when_serialized_then_stable_keys_present() {
    let result = run(
        &HealthStrategy::for_goal(GoalType::Recomposition),
        &signals(),
        &Thresholds::new(),
        None,
        &[],
        None,
    );
    let trace = serde_json::to_value(&result.trace).expect("trace serializes");

    for key in [
        "input_summary",
        "computed_signals",
        "goal_strategy_applied",
        "triggered_rules",
        "score_breakdown",
        "recommendation_ranking_trace",
        "confidence_notes",
        "alignment_confidence",
        "recommendation_confidence",
        "confidence_breakdown",
        "confidence_version",
        "context_applied",
        "context_notes",
        "context_version",
        "context_json",
        "engine_version",
    ] {
        assert!(trace.get(key).is_some(), "missing trace key {key}");
    }
    assert!(trace.get("governance").is_none());
}

#[test]
fn given_luteal_context_when_run_then_priority_scaled_down() {
    let strategy = HealthStrategy::for_goal(GoalType::GeneralHealth);
    let signals = signals();

    let plain = run(&strategy, &signals, &Thresholds::new(), None, &[], None);
    let luteal = run(
        &strategy,
        &signals,
        &Thresholds::new(),
        Some(&ContextInput::phase("luteal")),
        &[],
        None,
    );

    assert!(!plain.context_applied);
    assert!(luteal.context_applied);
    assert!(
        luteal.trace.score_breakdown.goal_adherence_penalty
            <= plain.trace.score_breakdown.goal_adherence_penalty
    );
    assert_eq!(luteal.context_json["penalty_scalars"]["priority_score_scale"], json!(0.95));
}

#[test]
fn given_caller_target_when_resolve_thresholds_then_defaults_overlaid() {
    let strategy = HealthStrategy::for_goal(GoalType::WeightLoss);
    let target = Thresholds::from([
        ("min_compliance".to_string(), 0.9),
        ("custom".to_string(), 1.0),
    ]);

    let resolved = resolve_thresholds(&strategy, &target);

    assert_eq!(resolved["min_compliance"], 0.9);
    assert_eq!(resolved["custom"], 1.0);
    assert_eq!(resolved["max_volatility"], strategy.default_thresholds()["max_volatility"]);
}

#[test]
fn given_cycle_context_when_run_then_score_inputs_carry_priority_score() {
    let strategy = HealthStrategy::for_goal(GoalType::WeightLoss);
    let signals = signals();
    let initial = strategy.evaluate(&signals, &resolve_thresholds(&strategy, &Thresholds::new()));

    let result = run(
        &strategy,
        &signals,
        &Thresholds::new(),
        Some(&ContextInput::phase("luteal")),
        &[],
        None,
    );

    let score_inputs = &result.context_json["metadata"]["score_inputs"];
    assert_eq!(score_inputs["priority_score"], json!(initial.priority_score));
    assert!(score_inputs.get("compliance_ratio").is_some());
}
