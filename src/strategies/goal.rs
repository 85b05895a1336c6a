use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::engine::error::{EngineError, unsupported_goal_type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    WeightLoss,
    Recomposition,
    StrengthGain,
    GeneralHealth,
}

impl GoalType {
    pub const ALL: [GoalType; 4] = [
        GoalType::WeightLoss,
        GoalType::Recomposition,
        GoalType::StrengthGain,
        GoalType::GeneralHealth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GoalType::WeightLoss => "weight_loss",
            GoalType::Recomposition => "recomposition",
            GoalType::StrengthGain => "strength_gain",
            GoalType::GeneralHealth => "general_health",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_lowercase();
        GoalType::ALL
            .into_iter()
            .find(|goal| goal.as_str() == normalized)
            .ok_or_else(|| unsupported_goal_type(format!("unsupported goal type '{raw}'")))
    }
}
