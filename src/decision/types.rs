use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Named numeric thresholds. Ordered so serialization is stable.
pub type Thresholds = BTreeMap<String, f64>;

/// Declared alphabetically so the derived ordering matches code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCode {
    ComplianceDrop,
    RecoveryDrop,
    StallRisk,
    VolatilitySpike,
}

impl RiskCode {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskCode::ComplianceDrop => "COMPLIANCE_DROP",
            RiskCode::RecoveryDrop => "RECOVERY_DROP",
            RiskCode::StallRisk => "STALL_RISK",
            RiskCode::VolatilitySpike => "VOLATILITY_SPIKE",
        }
    }
}

impl fmt::Display for RiskCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Training,
    Nutrition,
    Recovery,
    Habit,
}

impl RecommendationCategory {
    pub fn impact(self) -> f64 {
        match self {
            RecommendationCategory::Training => 0.9,
            RecommendationCategory::Nutrition => 0.85,
            RecommendationCategory::Recovery => 0.75,
            RecommendationCategory::Habit => 0.7,
        }
    }

    pub fn effort(self) -> f64 {
        match self {
            RecommendationCategory::Training => 0.6,
            RecommendationCategory::Nutrition => 0.5,
            RecommendationCategory::Recovery => 0.35,
            RecommendationCategory::Habit => 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    /// 1 is highest. Zero until the ranker assigns it.
    pub priority: u32,
    pub category: RecommendationCategory,
    pub action: String,
    pub expected_effect: String,
    pub reason_codes: Vec<RiskCode>,
    pub confidence: f64,
}

impl Recommendation {
    pub fn candidate(
        id: impl Into<String>,
        category: RecommendationCategory,
        action: impl Into<String>,
        expected_effect: impl Into<String>,
        reason_codes: Vec<RiskCode>,
        confidence: f64,
    ) -> Self {
        Self {
            id: id.into(),
            priority: 0,
            category,
            action: action.into(),
            expected_effect: expected_effect.into(),
            reason_codes,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Outcome of checking signals against goal thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub goal_name: String,
    pub deviations: BTreeMap<String, bool>,
    pub risks: Vec<RiskCode>,
    pub priority_score: f64,
    /// Signal values after neutral defaults were substituted.
    #[serde(default)]
    pub resolved_signals: BTreeMap<String, f64>,
    /// Optional per-threshold distance strengths in [0, 1].
    #[serde(default)]
    pub threshold_distances: Vec<f64>,
}

impl Evaluation {
    pub fn active_deviations(&self) -> impl Iterator<Item = &str> {
        self.deviations
            .iter()
            .filter(|(_, active)| **active)
            .map(|(name, _)| name.as_str())
    }

    pub fn is_deviating(&self, name: &str) -> bool {
        self.deviations.get(name).copied().unwrap_or(false)
    }
}
