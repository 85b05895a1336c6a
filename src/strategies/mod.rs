pub mod general_health;
pub mod goal;
pub mod recomposition;
pub mod rules;
pub mod strength_gain;
mod support;
pub mod weight_loss;

pub use general_health::GeneralHealthStrategy;
pub use goal::GoalType;
pub use recomposition::RecompositionStrategy;
pub use rules::detect_additional_risks;
pub use strength_gain::StrengthGainStrategy;
pub use weight_loss::WeightLossStrategy;

use crate::{
    decision::types::{Evaluation, Recommendation, RiskCode, Thresholds},
    engine::GoalStrategy,
    signals::SignalBundle,
};

/// Closed set of goal strategies, selected by [`GoalType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStrategy {
    WeightLoss(WeightLossStrategy),
    Recomposition(RecompositionStrategy),
    StrengthGain(StrengthGainStrategy),
    GeneralHealth(GeneralHealthStrategy),
}

impl HealthStrategy {
    pub fn for_goal(goal_type: GoalType) -> Self {
        match goal_type {
            GoalType::WeightLoss => HealthStrategy::WeightLoss(WeightLossStrategy),
            GoalType::Recomposition => HealthStrategy::Recomposition(RecompositionStrategy),
            GoalType::StrengthGain => HealthStrategy::StrengthGain(StrengthGainStrategy),
            GoalType::GeneralHealth => HealthStrategy::GeneralHealth(GeneralHealthStrategy),
        }
    }

    pub fn goal_type(&self) -> GoalType {
        match self {
            HealthStrategy::WeightLoss(_) => GoalType::WeightLoss,
            HealthStrategy::Recomposition(_) => GoalType::Recomposition,
            HealthStrategy::StrengthGain(_) => GoalType::StrengthGain,
            HealthStrategy::GeneralHealth(_) => GoalType::GeneralHealth,
        }
    }
}

impl GoalStrategy for HealthStrategy {
    type Signals = SignalBundle;

    fn goal_name(&self) -> &str {
        self.goal_type().as_str()
    }

    fn default_thresholds(&self) -> Thresholds {
        match self {
            HealthStrategy::WeightLoss(_) => WeightLossStrategy::default_thresholds(),
            HealthStrategy::Recomposition(_) => RecompositionStrategy::default_thresholds(),
            HealthStrategy::StrengthGain(_) => StrengthGainStrategy::default_thresholds(),
            HealthStrategy::GeneralHealth(_) => GeneralHealthStrategy::default_thresholds(),
        }
    }

    fn evaluate(&self, signals: &SignalBundle, target: &Thresholds) -> Evaluation {
        match self {
            HealthStrategy::WeightLoss(_) => WeightLossStrategy::evaluate(signals, target),
            HealthStrategy::Recomposition(_) => RecompositionStrategy::evaluate(signals, target),
            HealthStrategy::StrengthGain(_) => StrengthGainStrategy::evaluate(signals, target),
            HealthStrategy::GeneralHealth(_) => GeneralHealthStrategy::evaluate(signals, target),
        }
    }

    fn recommend(&self, evaluation: &Evaluation) -> Vec<Recommendation> {
        match self {
            HealthStrategy::WeightLoss(_) => WeightLossStrategy::recommend(evaluation),
            HealthStrategy::Recomposition(_) => RecompositionStrategy::recommend(evaluation),
            HealthStrategy::StrengthGain(_) => StrengthGainStrategy::recommend(evaluation),
            HealthStrategy::GeneralHealth(_) => GeneralHealthStrategy::recommend(evaluation),
        }
    }

    fn additional_risks(&self, signals: &SignalBundle) -> Vec<RiskCode> {
        detect_additional_risks(signals)
    }
}
