use serde::{Deserialize, Serialize};

use crate::math::clamp01;

const GOAL_ADHERENCE_SCALE: f64 = 35.0;
const RISK_PER_RULE: f64 = 6.0;
const RISK_CAP: f64 = 25.0;
const UNCERTAINTY_PER_SIGNAL: f64 = 2.0;
const UNCERTAINTY_CAP: f64 = 10.0;
const RECOVERY_RISK_SCALE: f64 = 20.0;
const STABILITY_SCALE: f64 = 10.0;

/// Five additive penalties subtracted from a perfect alignment of 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub goal_adherence_penalty: f64,
    pub risk_penalty: f64,
    pub uncertainty_penalty: f64,
    pub recovery_risk_penalty: f64,
    pub stability_penalty: f64,
}

impl ScoreBreakdown {
    pub fn penalties(&self) -> [f64; 5] {
        [
            self.goal_adherence_penalty,
            self.risk_penalty,
            self.uncertainty_penalty,
            self.recovery_risk_penalty,
            self.stability_penalty,
        ]
    }

    pub fn total(&self) -> f64 {
        self.penalties().iter().sum()
    }
}

pub fn build_breakdown(
    priority_score: f64,
    risk_count: usize,
    missing_signal_count: usize,
) -> ScoreBreakdown {
    let priority = clamp01(priority_score);
    ScoreBreakdown {
        goal_adherence_penalty: GOAL_ADHERENCE_SCALE * priority,
        risk_penalty: (RISK_PER_RULE * risk_count as f64).min(RISK_CAP),
        uncertainty_penalty: (UNCERTAINTY_PER_SIGNAL * missing_signal_count as f64)
            .min(UNCERTAINTY_CAP),
        recovery_risk_penalty: RECOVERY_RISK_SCALE * priority,
        stability_penalty: STABILITY_SCALE * priority,
    }
}
