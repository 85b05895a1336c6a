use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    context::ContextResult,
    decision::types::{Evaluation, Recommendation, RiskCode},
    governance::GovernanceRecord,
    scoring::{ConfidenceBreakdown, ConfidenceResult, RecommendationConfidence, ScoreBreakdown},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingTraceEntry {
    pub id: String,
    pub priority: u32,
    pub confidence: f64,
    pub computed_confidence: Option<f64>,
    pub reason_codes: Vec<RiskCode>,
}

/// Explanation of every intermediate decision in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub input_summary: Value,
    pub computed_signals: Value,
    pub goal_strategy_applied: String,
    pub triggered_rules: Vec<RiskCode>,
    pub score_breakdown: ScoreBreakdown,
    pub recommendation_ranking_trace: Vec<RankingTraceEntry>,
    pub confidence_notes: Vec<String>,
    pub alignment_confidence: f64,
    pub recommendation_confidence: Vec<RecommendationConfidence>,
    pub confidence_breakdown: ConfidenceBreakdown,
    pub confidence_version: String,
    pub context_applied: bool,
    pub context_notes: Vec<String>,
    pub context_version: String,
    pub context_json: Value,
    pub engine_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance: Option<GovernanceRecord>,
}

pub struct TraceSources<'a> {
    pub input_summary: Value,
    pub signal_payload: Value,
    pub evaluation: &'a Evaluation,
    pub triggered_rules: &'a [RiskCode],
    pub score_breakdown: ScoreBreakdown,
    pub ranked: &'a [Recommendation],
    pub missing_signal_count: usize,
    pub confidence: &'a ConfidenceResult,
    pub context: &'a ContextResult,
    pub engine_version: &'a str,
}

pub fn build_trace(sources: TraceSources<'_>) -> Trace {
    let recommendation_ranking_trace = sources
        .ranked
        .iter()
        .map(|rec| RankingTraceEntry {
            id: rec.id.clone(),
            priority: rec.priority,
            confidence: rec.confidence,
            computed_confidence: sources.confidence.for_recommendation(&rec.id),
            reason_codes: rec.reason_codes.clone(),
        })
        .collect();

    let mut confidence_notes = Vec::new();
    if sources.missing_signal_count > 0 {
        confidence_notes.push(format!(
            "{} signal(s) missing; uncertainty penalty applied.",
            sources.missing_signal_count
        ));
    }
    if sources.triggered_rules.is_empty() {
        confidence_notes.push("No critical risk rules triggered in this run.".to_string());
    }
    confidence_notes.extend(sources.confidence.confidence_notes.iter().cloned());

    Trace {
        input_summary: sources.input_summary,
        computed_signals: computed_signals(sources.signal_payload, sources.evaluation),
        goal_strategy_applied: sources.evaluation.goal_name.clone(),
        triggered_rules: sources.triggered_rules.to_vec(),
        score_breakdown: sources.score_breakdown,
        recommendation_ranking_trace,
        confidence_notes,
        alignment_confidence: sources.confidence.alignment_confidence,
        recommendation_confidence: sources.confidence.recommendation_confidence.clone(),
        confidence_breakdown: sources.confidence.confidence_breakdown.clone(),
        confidence_version: sources.confidence.confidence_version.clone(),
        context_applied: sources.context.context_applied,
        context_notes: sources.context.notes.clone(),
        context_version: sources.context.context_version.clone(),
        context_json: sources.context.payload(),
        engine_version: sources.engine_version.to_string(),
        governance: None,
    }
}

/// Signal payload extended with what the strategy concluded from it.
fn computed_signals(signal_payload: Value, evaluation: &Evaluation) -> Value {
    let mut computed = match signal_payload {
        Value::Object(map) => map,
        other => {
            let mut map = serde_json::Map::new();
            map.insert("signals".to_string(), other);
            map
        }
    };
    computed.insert("deviations".to_string(), json!(evaluation.deviations));
    computed.insert("priority_score".to_string(), json!(evaluation.priority_score));
    computed.insert(
        "resolved_signals".to_string(),
        json!(evaluation.resolved_signals),
    );
    Value::Object(computed)
}
