use crate::{
    decision::types::{Evaluation, Recommendation, RecommendationCategory, RiskCode, Thresholds},
    math::clamp01,
    signals::SignalBundle,
    strategies::support::{
        Candidate, EvaluationDraft, MIN_DENOMINATOR, gated_recommendations, threshold, thresholds,
    },
};

const MAX_WEIGHT_SLOPE: f64 = -0.05;
const MAX_VOLATILITY: f64 = 0.06;
const MIN_COMPLIANCE: f64 = 0.8;
const MIN_RECOVERY: f64 = 0.55;

const CANDIDATES: [Candidate; 3] = [
    Candidate {
        gate: "compliance_miss",
        id: "wl_compliance_01",
        category: RecommendationCategory::Habit,
        action: "Pre-log calories for the next 3 days and set a fixed intake range.",
        expected_effect: "Improves adherence and restores deficit consistency.",
        confidence: 0.84,
    },
    Candidate {
        gate: "trend_miss",
        id: "wl_nutrition_01",
        category: RecommendationCategory::Nutrition,
        action: "Reduce daily calories by 150-200 kcal for 7 days.",
        expected_effect: "Increases likelihood of negative weight trend.",
        confidence: 0.78,
    },
    Candidate {
        gate: "recovery_miss",
        id: "wl_recovery_01",
        category: RecommendationCategory::Recovery,
        action: "Reduce training volume by 10% for one week.",
        expected_effect: "Lowers fatigue and improves training adherence.",
        confidence: 0.73,
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightLossStrategy;

impl WeightLossStrategy {
    pub const GOAL_NAME: &'static str = "weight_loss";

    pub fn default_thresholds() -> Thresholds {
        thresholds(&[
            ("max_weight_slope", MAX_WEIGHT_SLOPE),
            ("max_volatility", MAX_VOLATILITY),
            ("min_compliance", MIN_COMPLIANCE),
            ("min_recovery", MIN_RECOVERY),
        ])
    }

    pub fn evaluate(signals: &SignalBundle, target: &Thresholds) -> Evaluation {
        let trend = signals.trend_slope().unwrap_or(0.0);
        let compliance = signals.compliance_ratio().unwrap_or(0.5);
        let recovery = signals.recovery_index().unwrap_or(0.5);
        let volatility = signals.volatility_index().unwrap_or(0.08);

        let max_slope = threshold(target, "max_weight_slope", MAX_WEIGHT_SLOPE);
        let max_volatility = threshold(target, "max_volatility", MAX_VOLATILITY);
        let min_compliance = threshold(target, "min_compliance", MIN_COMPLIANCE);
        let min_recovery = threshold(target, "min_recovery", MIN_RECOVERY);

        let trend_miss = trend > max_slope;
        let compliance_miss = compliance < min_compliance;
        let recovery_miss = recovery < min_recovery;
        let volatility_miss = volatility > max_volatility;

        let priority_score = 0.35 * (1.0 - clamp01(compliance))
            + 0.30 * clamp01((trend - max_slope).max(0.0))
            + 0.20 * (1.0 - clamp01(recovery))
            + 0.15 * clamp01(volatility / max_volatility.max(MIN_DENOMINATOR));

        EvaluationDraft {
            goal_name: Self::GOAL_NAME,
            deviations: &[
                ("trend_miss", trend_miss),
                ("compliance_miss", compliance_miss),
                ("recovery_miss", recovery_miss),
                ("volatility_miss", volatility_miss),
            ],
            risks: &[
                (trend_miss, RiskCode::StallRisk),
                (compliance_miss, RiskCode::ComplianceDrop),
                (recovery_miss, RiskCode::RecoveryDrop),
                (volatility_miss, RiskCode::VolatilitySpike),
            ],
            priority_score,
            resolved: &[
                ("trend_slope", trend),
                ("compliance_ratio", compliance),
                ("recovery_index", recovery),
                ("volatility_index", volatility),
            ],
        }
        .finish()
    }

    pub fn recommend(evaluation: &Evaluation) -> Vec<Recommendation> {
        gated_recommendations(evaluation, &CANDIDATES)
    }
}
