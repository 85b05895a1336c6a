use std::collections::BTreeMap;

use crate::decision::types::{
    Evaluation, Recommendation, RecommendationCategory, RiskCode, Thresholds,
};

pub(crate) const MIN_DENOMINATOR: f64 = 1e-6;

pub(crate) fn threshold(target: &Thresholds, key: &str, default: f64) -> f64 {
    target.get(key).copied().unwrap_or(default)
}

pub(crate) fn thresholds(defaults: &[(&str, f64)]) -> Thresholds {
    defaults
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect()
}

/// Recommendation emitted when its gating deviation is active.
pub(crate) struct Candidate {
    pub gate: &'static str,
    pub id: &'static str,
    pub category: RecommendationCategory,
    pub action: &'static str,
    pub expected_effect: &'static str,
    pub confidence: f64,
}

pub(crate) fn gated_recommendations(
    evaluation: &Evaluation,
    candidates: &[Candidate],
) -> Vec<Recommendation> {
    candidates
        .iter()
        .filter(|candidate| evaluation.is_deviating(candidate.gate))
        .map(|candidate| {
            Recommendation::candidate(
                candidate.id,
                candidate.category,
                candidate.action,
                candidate.expected_effect,
                evaluation.risks.clone(),
                candidate.confidence,
            )
        })
        .collect()
}

pub(crate) struct EvaluationDraft<'a> {
    pub goal_name: &'a str,
    pub deviations: &'a [(&'a str, bool)],
    pub risks: &'a [(bool, RiskCode)],
    pub priority_score: f64,
    pub resolved: &'a [(&'a str, f64)],
}

impl EvaluationDraft<'_> {
    pub fn finish(self) -> Evaluation {
        let mut risks: Vec<RiskCode> = Vec::new();
        for (triggered, code) in self.risks {
            if *triggered && !risks.contains(code) {
                risks.push(*code);
            }
        }

        Evaluation {
            goal_name: self.goal_name.to_string(),
            deviations: self
                .deviations
                .iter()
                .map(|(name, active)| (name.to_string(), *active))
                .collect(),
            risks,
            priority_score: self.priority_score.clamp(0.0, 1.0),
            resolved_signals: self
                .resolved
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<BTreeMap<_, _>>(),
            threshold_distances: Vec::new(),
        }
    }
}
