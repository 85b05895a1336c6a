use std::collections::BTreeMap;

use alignment_engine::{
    decision::types::{Evaluation, Recommendation, RecommendationCategory, RiskCode},
    scoring::{CONFIDENCE_VERSION, ConfidenceInputs, HistoryEntry, compute_confidence},
};

fn sufficiency(present: usize, total: usize) -> BTreeMap<String, bool> {
    (0..total)
        .map(|index| (format!("signal_{index}"), index < present))
        .collect()
}

fn evaluation(active: &[&str], inactive: &[&str]) -> Evaluation {
    let deviations = active
        .iter()
        .map(|name| (name.to_string(), true))
        .chain(inactive.iter().map(|name| (name.to_string(), false)))
        .collect();
    Evaluation {
        goal_name: "general_health".to_string(),
        deviations,
        risks: vec![RiskCode::ComplianceDrop],
        priority_score: 0.4,
        resolved_signals: BTreeMap::new(),
        threshold_distances: Vec::new(),
    }
}

fn history(active: &[&str]) -> HistoryEntry {
    HistoryEntry {
        deviations: active.iter().map(|name| (name.to_string(), true)).collect(),
    }
}

fn recommendation(reason_codes: Vec<RiskCode>) -> Recommendation {
    Recommendation::candidate(
        "gh_habit_01",
        RecommendationCategory::Habit,
        "act",
        "effect",
        reason_codes,
        0.81,
    )
}

fn inputs<'a>(
    sufficiency: &'a BTreeMap<String, bool>,
    evaluation: &'a Evaluation,
    history: &'a [HistoryEntry],
    recommendations: &'a [Recommendation],
) -> ConfidenceInputs<'a> {
    ConfidenceInputs {
        sufficiency,
        dispersion: Some(0.0),
        evaluation,
        history,
        available_observations: 7,
        required_observations: 7,
        previous_confidence: None,
        smoothing_alpha: 0.2,
        recommendations,
    }
}

#[test]
fn given_complete_stable_inputs_when_compute_confidence_then_components_match() {
    let sufficiency = sufficiency(6, 6);
    let evaluation = evaluation(&["compliance_miss"], &["recovery_miss", "volatility_miss", "balance_miss"]);
    let history = vec![history(&["compliance_miss"]), history(&["recovery_miss"])];

    let result = compute_confidence(&inputs(&sufficiency, &evaluation, &history, &[]));
    let components = result.confidence_breakdown.components;

    assert_eq!(components.data_completeness, 1.0);
    assert_eq!(components.signal_stability, 1.0);
    assert_eq!(components.threshold_distance, 0.75);
    assert_eq!(components.historical_persistence, 0.5);
    assert_eq!(components.window_sufficiency, 1.0);
    // 0.30 + 0.20 + 0.20*0.75 + 0.20*0.5 + 0.10
    assert_eq!(result.alignment_confidence, 0.85);
    assert_eq!(result.confidence_version, CONFIDENCE_VERSION);
    assert!(!result.confidence_breakdown.smoothing.previous_used);
    assert_eq!(
        result.confidence_notes,
        vec!["Confidence supported by sufficient and stable inputs.".to_string()]
    );
}

#[test]
fn given_previous_confidence_when_compute_confidence_then_smoothed() {
    let sufficiency = sufficiency(6, 6);
    let evaluation = evaluation(&["compliance_miss"], &["recovery_miss", "volatility_miss", "balance_miss"]);
    let history = vec![history(&["compliance_miss"]), history(&["recovery_miss"])];
    let mut smoothed_inputs = inputs(&sufficiency, &evaluation, &history, &[]);
    smoothed_inputs.previous_confidence = Some(0.35);

    let result = compute_confidence(&smoothed_inputs);

    // 0.2*0.35 + 0.8*0.85
    assert_eq!(result.alignment_confidence, 0.75);
    assert!(result.confidence_breakdown.smoothing.previous_used);
}

#[test]
fn given_sparse_volatile_short_window_when_compute_confidence_then_all_notes_emitted() {
    let sufficiency = sufficiency(2, 6);
    let evaluation = evaluation(&[], &["compliance_miss"]);
    let mut degraded = inputs(&sufficiency, &evaluation, &[], &[]);
    degraded.dispersion = Some(0.2);
    degraded.available_observations = 3;

    let result = compute_confidence(&degraded);
    let components = result.confidence_breakdown.components;

    assert_eq!(components.signal_stability, 0.0);
    assert_eq!(components.historical_persistence, 0.5);
    assert_eq!(components.window_sufficiency, 0.4286);
    assert_eq!(result.confidence_notes.len(), 3);
    assert!((0.0..=1.0).contains(&result.alignment_confidence));
}

#[test]
fn given_clean_current_run_with_history_when_compute_confidence_then_persistence_is_fixed() {
    let sufficiency = sufficiency(6, 6);
    let evaluation = evaluation(&[], &["compliance_miss"]);
    let history = vec![history(&["compliance_miss"])];

    let result = compute_confidence(&inputs(&sufficiency, &evaluation, &history, &[]));
    assert_eq!(result.confidence_breakdown.components.historical_persistence, 0.7);
}

#[test]
fn given_recommendations_when_compute_confidence_then_reasoned_ones_score_higher() {
    let sufficiency = sufficiency(6, 6);
    let evaluation = evaluation(&["compliance_miss"], &[]);
    let mut unexplained = recommendation(Vec::new());
    unexplained.id = "plain".to_string();
    let recommendations = vec![recommendation(vec![RiskCode::ComplianceDrop]), unexplained];

    let result = compute_confidence(&inputs(&sufficiency, &evaluation, &[], &recommendations));

    let reasoned = result.for_recommendation("gh_habit_01").expect("reasoned");
    let plain = result.for_recommendation("plain").expect("plain");
    assert!(reasoned > plain);
    for entry in &result.recommendation_confidence {
        assert!((0.0..=1.0).contains(&entry.confidence));
    }
}
