use crate::{
    decision::types::{Evaluation, Recommendation, RecommendationCategory, RiskCode, Thresholds},
    math::clamp01,
    signals::SignalBundle,
    strategies::support::{
        Candidate, EvaluationDraft, MIN_DENOMINATOR, gated_recommendations, threshold, thresholds,
    },
};

const MIN_COMPLIANCE: f64 = 0.7;
const MIN_RECOVERY: f64 = 0.55;
const MAX_VOLATILITY: f64 = 0.08;
const MIN_BALANCE: f64 = 0.6;

const CANDIDATES: [Candidate; 3] = [
    Candidate {
        gate: "compliance_miss",
        id: "gh_habit_01",
        category: RecommendationCategory::Habit,
        action: "Set a weekly minimum activity target with calendar reminders.",
        expected_effect: "Improves consistency and baseline health behaviors.",
        confidence: 0.81,
    },
    Candidate {
        gate: "recovery_miss",
        id: "gh_recovery_01",
        category: RecommendationCategory::Recovery,
        action: "Add one extra rest day and cap high-RPE sessions this week.",
        expected_effect: "Reduces fatigue accumulation and supports sustainability.",
        confidence: 0.76,
    },
    Candidate {
        gate: "volatility_miss",
        id: "gh_nutrition_01",
        category: RecommendationCategory::Nutrition,
        action: "Standardize meal timing and calorie range on weekdays.",
        expected_effect: "Lowers behavioral volatility and improves routine.",
        confidence: 0.7,
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneralHealthStrategy;

impl GeneralHealthStrategy {
    pub const GOAL_NAME: &'static str = "general_health";

    pub fn default_thresholds() -> Thresholds {
        thresholds(&[
            ("min_compliance", MIN_COMPLIANCE),
            ("min_recovery", MIN_RECOVERY),
            ("max_volatility", MAX_VOLATILITY),
            ("min_balance", MIN_BALANCE),
        ])
    }

    pub fn evaluate(signals: &SignalBundle, target: &Thresholds) -> Evaluation {
        let compliance = signals.compliance_ratio().unwrap_or(0.5);
        let recovery = signals.recovery_index().unwrap_or(0.5);
        let volatility = signals.volatility_index().unwrap_or(0.08);
        let balance = signals.muscle_balance_index().unwrap_or(0.5);

        let min_compliance = threshold(target, "min_compliance", MIN_COMPLIANCE);
        let min_recovery = threshold(target, "min_recovery", MIN_RECOVERY);
        let max_volatility = threshold(target, "max_volatility", MAX_VOLATILITY);
        let min_balance = threshold(target, "min_balance", MIN_BALANCE);

        let compliance_miss = compliance < min_compliance;
        let recovery_miss = recovery < min_recovery;
        let volatility_miss = volatility > max_volatility;
        let balance_miss = balance < min_balance;

        let priority_score = 0.35 * (1.0 - clamp01(compliance))
            + 0.25 * (1.0 - clamp01(recovery))
            + 0.20 * clamp01(volatility / max_volatility.max(MIN_DENOMINATOR))
            + 0.20 * (1.0 - clamp01(balance));

        EvaluationDraft {
            goal_name: Self::GOAL_NAME,
            deviations: &[
                ("compliance_miss", compliance_miss),
                ("recovery_miss", recovery_miss),
                ("volatility_miss", volatility_miss),
                ("balance_miss", balance_miss),
            ],
            risks: &[
                (compliance_miss, RiskCode::ComplianceDrop),
                (recovery_miss, RiskCode::RecoveryDrop),
                (volatility_miss, RiskCode::VolatilitySpike),
            ],
            priority_score,
            resolved: &[
                ("compliance_ratio", compliance),
                ("recovery_index", recovery),
                ("volatility_index", volatility),
                ("muscle_balance_index", balance),
            ],
        }
        .finish()
    }

    pub fn recommend(evaluation: &Evaluation) -> Vec<Recommendation> {
        gated_recommendations(evaluation, &CANDIDATES)
    }
}
