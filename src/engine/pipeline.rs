use std::collections::BTreeSet;

use serde_json::Value;

use crate::{
    context::{ContextInput, apply_context},
    decision::{
        rank,
        record::DecisionResult,
        types::{RiskCode, Thresholds},
    },
    engine::contracts::{GoalStrategy, SignalSource},
    explain::{TraceSources, build_trace},
    math::{clamp01, round_to},
    scoring::{
        ConfidenceInputs, HistoryEntry, build_breakdown, compute_alignment_score,
        compute_confidence, risk_score,
    },
};

const SCORE_PLACES: i32 = 2;

/// Everything a single run needs besides the strategy and its signals.
pub struct RunInputs<'a> {
    pub target: &'a Thresholds,
    pub context: Option<&'a ContextInput>,
    pub history: &'a [HistoryEntry],
    pub previous_confidence: Option<f64>,
    pub smoothing_alpha: f64,
    pub available_observations: u32,
    pub required_observations: u32,
    pub input_summary: Value,
    pub engine_version: &'a str,
}

/// Strategy defaults overlaid with the caller's target values.
pub fn resolve_thresholds<S: GoalStrategy>(strategy: &S, target: &Thresholds) -> Thresholds {
    let mut thresholds = strategy.default_thresholds();
    for (key, value) in target {
        thresholds.insert(key.clone(), *value);
    }
    thresholds
}

pub fn evaluate_and_decide<S: GoalStrategy>(
    strategy: &S,
    signals: &S::Signals,
    inputs: RunInputs<'_>,
) -> DecisionResult {
    let base_thresholds = resolve_thresholds(strategy, inputs.target);
    let initial = strategy.evaluate(signals, &base_thresholds);

    let mut score_inputs = initial.resolved_signals.clone();
    score_inputs.insert("priority_score".to_string(), initial.priority_score);
    let context = apply_context(
        strategy.goal_name(),
        &base_thresholds,
        &score_inputs,
        inputs.context,
    );
    let evaluation = if context.context_applied {
        strategy.evaluate(signals, &context.modulated_thresholds)
    } else {
        initial
    };
    let urgency = clamp01(evaluation.priority_score * context.priority_score_scale());

    let mut rules: BTreeSet<RiskCode> = evaluation.risks.iter().copied().collect();
    rules.extend(strategy.additional_risks(signals));
    let triggered_rules: Vec<RiskCode> = rules.into_iter().collect();

    let candidates = strategy.recommend(&evaluation);
    let ranked = rank(&candidates, urgency);

    let sufficiency = signals.sufficiency();
    let missing_signal_count = sufficiency.values().filter(|ok| !**ok).count();
    let score_breakdown = build_breakdown(urgency, triggered_rules.len(), missing_signal_count);
    let alignment = compute_alignment_score(&score_breakdown.penalties());
    let risk = risk_score(alignment);

    let confidence = compute_confidence(&ConfidenceInputs {
        sufficiency: &sufficiency,
        dispersion: signals.dispersion(),
        evaluation: &evaluation,
        history: inputs.history,
        available_observations: inputs.available_observations,
        required_observations: inputs.required_observations,
        previous_confidence: inputs.previous_confidence,
        smoothing_alpha: inputs.smoothing_alpha,
        recommendations: &ranked,
    });

    let trace = build_trace(TraceSources {
        input_summary: inputs.input_summary,
        signal_payload: signals.signal_payload(),
        evaluation: &evaluation,
        triggered_rules: &triggered_rules,
        score_breakdown,
        ranked: &ranked,
        missing_signal_count,
        confidence: &confidence,
        context: &context,
        engine_version: inputs.engine_version,
    });

    tracing::debug!(
        target: "engine",
        goal = %evaluation.goal_name,
        urgency = urgency,
        alignment = alignment,
        rules = triggered_rules.len(),
        missing = missing_signal_count,
        context_applied = context.context_applied,
        "decision_evaluated"
    );

    DecisionResult {
        alignment_score: round_to(alignment, SCORE_PLACES),
        risk_score: round_to(risk, SCORE_PLACES),
        recommendations: ranked,
        trace,
        alignment_confidence: confidence.alignment_confidence,
        recommendation_confidence: confidence.recommendation_confidence,
        confidence_breakdown: confidence.confidence_breakdown,
        confidence_version: confidence.confidence_version,
        context_applied: context.context_applied,
        context_notes: context.notes.clone(),
        context_version: context.context_version.clone(),
        context_json: context.payload(),
        engine_version: inputs.engine_version.to_string(),
    }
}
