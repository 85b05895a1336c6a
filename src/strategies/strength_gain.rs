use crate::{
    decision::types::{Evaluation, Recommendation, RecommendationCategory, RiskCode, Thresholds},
    math::clamp01,
    signals::SignalBundle,
    strategies::support::{
        Candidate, EvaluationDraft, gated_recommendations, threshold, thresholds,
    },
};

const MIN_OVERLOAD: f64 = 0.72;
const MIN_RECOVERY: f64 = 0.6;
const MIN_COMPLIANCE: f64 = 0.8;
const MIN_STRENGTH_TREND: f64 = 0.0;

const CANDIDATES: [Candidate; 3] = [
    Candidate {
        gate: "overload_miss",
        id: "sg_training_01",
        category: RecommendationCategory::Training,
        action: "Increase top-set load by 2.5% and keep accessory volume stable.",
        expected_effect: "Restores progressive overload signal.",
        confidence: 0.85,
    },
    Candidate {
        gate: "recovery_miss",
        id: "sg_recovery_01",
        category: RecommendationCategory::Recovery,
        action: "Insert one low-intensity day after each heavy session.",
        expected_effect: "Improves readiness for high-intensity lifts.",
        confidence: 0.8,
    },
    Candidate {
        gate: "compliance_miss",
        id: "sg_habit_01",
        category: RecommendationCategory::Habit,
        action: "Lock a fixed weekly lifting schedule with 3 non-negotiable sessions.",
        expected_effect: "Improves consistency and training frequency.",
        confidence: 0.79,
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrengthGainStrategy;

impl StrengthGainStrategy {
    pub const GOAL_NAME: &'static str = "strength_gain";

    pub fn default_thresholds() -> Thresholds {
        thresholds(&[
            ("min_overload", MIN_OVERLOAD),
            ("min_recovery", MIN_RECOVERY),
            ("min_compliance", MIN_COMPLIANCE),
            ("min_strength_trend", MIN_STRENGTH_TREND),
        ])
    }

    pub fn evaluate(signals: &SignalBundle, target: &Thresholds) -> Evaluation {
        let overload = signals.progressive_overload_score().unwrap_or(0.5);
        let recovery = signals.recovery_index().unwrap_or(0.5);
        let compliance = signals.compliance_ratio().unwrap_or(0.5);
        let trend = signals.trend_slope().unwrap_or(0.0);

        let min_overload = threshold(target, "min_overload", MIN_OVERLOAD);
        let min_recovery = threshold(target, "min_recovery", MIN_RECOVERY);
        let min_compliance = threshold(target, "min_compliance", MIN_COMPLIANCE);
        let min_trend = threshold(target, "min_strength_trend", MIN_STRENGTH_TREND);

        let overload_miss = overload < min_overload;
        let recovery_miss = recovery < min_recovery;
        let compliance_miss = compliance < min_compliance;
        let progress_miss = trend < min_trend;

        let priority_score = 0.40 * (1.0 - clamp01(overload))
            + 0.25 * (1.0 - clamp01(recovery))
            + 0.20 * (1.0 - clamp01(compliance))
            + 0.15 * clamp01((min_trend - trend).max(0.0));

        EvaluationDraft {
            goal_name: Self::GOAL_NAME,
            deviations: &[
                ("overload_miss", overload_miss),
                ("recovery_miss", recovery_miss),
                ("compliance_miss", compliance_miss),
                ("progress_miss", progress_miss),
            ],
            risks: &[
                (overload_miss || progress_miss, RiskCode::StallRisk),
                (recovery_miss, RiskCode::RecoveryDrop),
                (compliance_miss, RiskCode::ComplianceDrop),
            ],
            priority_score,
            resolved: &[
                ("progressive_overload_score", overload),
                ("recovery_index", recovery),
                ("compliance_ratio", compliance),
                ("trend_slope", trend),
            ],
        }
        .finish()
    }

    pub fn recommend(evaluation: &Evaluation) -> Vec<Recommendation> {
        gated_recommendations(evaluation, &CANDIDATES)
    }
}
