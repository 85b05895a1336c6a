use crate::{
    decision::types::{Evaluation, Recommendation, RecommendationCategory, RiskCode, Thresholds},
    math::clamp01,
    signals::SignalBundle,
    strategies::support::{
        Candidate, EvaluationDraft, MIN_DENOMINATOR, gated_recommendations, threshold, thresholds,
    },
};

const MAX_ABS_WEIGHT_SLOPE: f64 = 0.06;
const MIN_OVERLOAD: f64 = 0.65;
const MIN_BALANCE: f64 = 0.65;
const MIN_COMPLIANCE: f64 = 0.8;

const CANDIDATES: [Candidate; 3] = [
    Candidate {
        gate: "overload_miss",
        id: "rc_training_01",
        category: RecommendationCategory::Training,
        action: "Add one progressive overload anchor lift and track weekly top set.",
        expected_effect: "Improves strength stimulus while preserving recomposition.",
        confidence: 0.82,
    },
    Candidate {
        gate: "weight_drift",
        id: "rc_nutrition_01",
        category: RecommendationCategory::Nutrition,
        action: "Adjust calories by +/-100 based on trend direction for 7 days.",
        expected_effect: "Keeps bodyweight inside recomposition band.",
        confidence: 0.77,
    },
    Candidate {
        gate: "balance_miss",
        id: "rc_training_02",
        category: RecommendationCategory::Training,
        action: "Rebalance weekly split to even push/pull/lower volume.",
        expected_effect: "Improves muscular symmetry and training quality.",
        confidence: 0.72,
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecompositionStrategy;

impl RecompositionStrategy {
    pub const GOAL_NAME: &'static str = "recomposition";

    pub fn default_thresholds() -> Thresholds {
        thresholds(&[
            ("max_abs_weight_slope", MAX_ABS_WEIGHT_SLOPE),
            ("min_overload", MIN_OVERLOAD),
            ("min_balance", MIN_BALANCE),
            ("min_compliance", MIN_COMPLIANCE),
        ])
    }

    pub fn evaluate(signals: &SignalBundle, target: &Thresholds) -> Evaluation {
        let trend = signals.trend_slope().unwrap_or(0.0);
        let overload = signals.progressive_overload_score().unwrap_or(0.5);
        let balance = signals.muscle_balance_index().unwrap_or(0.5);
        let compliance = signals.compliance_ratio().unwrap_or(0.5);

        let max_abs_trend = threshold(target, "max_abs_weight_slope", MAX_ABS_WEIGHT_SLOPE);
        let min_overload = threshold(target, "min_overload", MIN_OVERLOAD);
        let min_balance = threshold(target, "min_balance", MIN_BALANCE);
        let min_compliance = threshold(target, "min_compliance", MIN_COMPLIANCE);

        let weight_drift = trend.abs() > max_abs_trend;
        let overload_miss = overload < min_overload;
        let balance_miss = balance < min_balance;
        let compliance_miss = compliance < min_compliance;

        let priority_score = 0.35 * (1.0 - clamp01(overload))
            + 0.25 * (1.0 - clamp01(balance))
            + 0.25 * (1.0 - clamp01(compliance))
            + 0.15 * clamp01(trend.abs() / max_abs_trend.max(MIN_DENOMINATOR));

        EvaluationDraft {
            goal_name: Self::GOAL_NAME,
            deviations: &[
                ("weight_drift", weight_drift),
                ("overload_miss", overload_miss),
                ("balance_miss", balance_miss),
                ("compliance_miss", compliance_miss),
            ],
            risks: &[
                (overload_miss || weight_drift, RiskCode::StallRisk),
                (compliance_miss, RiskCode::ComplianceDrop),
            ],
            priority_score,
            resolved: &[
                ("trend_slope", trend),
                ("progressive_overload_score", overload),
                ("muscle_balance_index", balance),
                ("compliance_ratio", compliance),
            ],
        }
        .finish()
    }

    pub fn recommend(evaluation: &Evaluation) -> Vec<Recommendation> {
        gated_recommendations(evaluation, &CANDIDATES)
    }
}
