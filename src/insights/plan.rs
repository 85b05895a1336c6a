use serde::{Deserialize, Serialize};

use crate::{
    decision::{record::DecisionRecord, types::RecommendationCategory},
    math::{clamp01, round_to},
};

const PERSISTENCE_RUNS: usize = 5;
const MAINTAIN_ACTION_ID: &str = "maintain_current_protocol";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSeverity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomorrowPlan {
    pub action_id: String,
    pub action: String,
    pub reason: String,
    pub confidence: f64,
    pub severity: PlanSeverity,
    pub expected_impact: String,
    pub priority_score: f64,
}

/// Single next-day action from `latest`, weighted by how often the same
/// recommendation recurred in `recent_runs` (newest first).
pub fn build_tomorrow_plan(latest: &DecisionRecord, recent_runs: &[DecisionRecord]) -> TomorrowPlan {
    let result = &latest.result;
    let rule_count = result.trace.triggered_rules.len();
    let severity = severity(result.risk_score, rule_count);

    if result.recommendations.is_empty() {
        return TomorrowPlan {
            action_id: MAINTAIN_ACTION_ID.to_string(),
            action: "Maintain current protocol and re-evaluate tomorrow.".to_string(),
            reason: "No critical recommendation exceeded deterministic priority threshold."
                .to_string(),
            confidence: round_to(clamp01(result.alignment_confidence), 4),
            severity,
            expected_impact: "Preserves stability while monitoring new deviations.".to_string(),
            priority_score: 0.0,
        };
    }

    let risk_component = clamp01(result.risk_score / 100.0 + 0.05 * rule_count as f64);
    let mut candidates: Vec<(u32, TomorrowPlan)> = result
        .recommendations
        .iter()
        .map(|rec| {
            let confidence = result
                .recommendation_confidence
                .iter()
                .find(|entry| entry.id == rec.id)
                .map(|entry| entry.confidence)
                .unwrap_or(rec.confidence);
            let confidence = clamp01(confidence);
            let score = 0.35 * risk_component
                + 0.30 * persistence(&rec.id, recent_runs)
                + 0.20 * relevance(rec.category)
                + 0.15 * confidence;

            let reason = if rec.reason_codes.is_empty() {
                "Priority recommendation from deterministic ranking.".to_string()
            } else {
                rec.reason_codes
                    .iter()
                    .map(|code| code.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            (
                rec.priority,
                TomorrowPlan {
                    action_id: rec.id.clone(),
                    action: rec.action.clone(),
                    reason,
                    confidence: round_to(confidence, 4),
                    severity,
                    expected_impact: rec.expected_effect.clone(),
                    priority_score: round_to(score, 4),
                },
            )
        })
        .collect();

    candidates.sort_by(|(lhs_priority, lhs), (rhs_priority, rhs)| {
        rhs.priority_score
            .total_cmp(&lhs.priority_score)
            .then_with(|| lhs_priority.cmp(rhs_priority))
            .then_with(|| lhs.action_id.cmp(&rhs.action_id))
    });
    candidates.swap_remove(0).1
}

fn severity(risk_score: f64, rule_count: usize) -> PlanSeverity {
    if risk_score >= 60.0 || rule_count >= 4 {
        PlanSeverity::High
    } else if risk_score >= 35.0 || rule_count >= 2 {
        PlanSeverity::Medium
    } else {
        PlanSeverity::Low
    }
}

fn persistence(rec_id: &str, recent_runs: &[DecisionRecord]) -> f64 {
    if recent_runs.is_empty() {
        return 0.5;
    }
    let window = &recent_runs[..recent_runs.len().min(PERSISTENCE_RUNS)];
    let hits = window
        .iter()
        .filter(|run| run.result.recommendations.iter().any(|rec| rec.id == rec_id))
        .count();
    clamp01(hits as f64 / window.len() as f64)
}

fn relevance(category: RecommendationCategory) -> f64 {
    match category {
        RecommendationCategory::Recovery => 0.90,
        RecommendationCategory::Training => 0.85,
        RecommendationCategory::Habit => 0.80,
        RecommendationCategory::Nutrition => 0.78,
    }
}
