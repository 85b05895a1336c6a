use serde::{Deserialize, Serialize};
use time::Date;

use crate::{decision::record::DecisionRecord, insights::series::signal_series};

pub const STAGNATION_VERSION: &str = "stg_v1";
pub const DEFAULT_MIN_POINTS: usize = 5;

const FLAT_TREND_LIMIT: f64 = 0.01;
const OVERLOAD_POINTS: usize = 4;
const OVERLOAD_SPREAD_LIMIT: f64 = 0.04;
const COMPLIANCE_DRIFT_LIMIT: f64 = 0.08;
const LOW_RECOVERY_POINTS: usize = 3;
const LOW_RECOVERY_FLOOR: f64 = 0.50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagnationAlert {
    pub alert_id: String,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub severity: Severity,
    pub message: String,
    pub recommendation: String,
    pub confidence: f64,
    pub triggered_at: Date,
    pub version: String,
}

struct AlertSpec {
    alert_id: &'static str,
    alert_type: &'static str,
    severity: Severity,
    message: &'static str,
    recommendation: &'static str,
    confidence: f64,
}

impl AlertSpec {
    fn raise(&self, triggered_at: Date) -> StagnationAlert {
        StagnationAlert {
            alert_id: self.alert_id.to_string(),
            alert_type: self.alert_type.to_string(),
            severity: self.severity,
            message: self.message.to_string(),
            recommendation: self.recommendation.to_string(),
            confidence: self.confidence,
            triggered_at,
            version: STAGNATION_VERSION.to_string(),
        }
    }
}

const FLAT_TREND: AlertSpec = AlertSpec {
    alert_id: "stagnation_weight_trend",
    alert_type: "weight_trend_stagnation",
    severity: Severity::Medium,
    message: "Weight trend slope has remained near-flat over the configured window.",
    recommendation: "Adjust adherence or calorie consistency and re-check in 5 days.",
    confidence: 0.82,
};

const FLAT_OVERLOAD: AlertSpec = AlertSpec {
    alert_id: "stagnation_overload_flat",
    alert_type: "overload_flatline",
    severity: Severity::Medium,
    message: "Progressive overload score has remained flat across recent windows.",
    recommendation: "Introduce a controlled overload progression adjustment next cycle.",
    confidence: 0.79,
};

const COMPLIANCE_DRIFT: AlertSpec = AlertSpec {
    alert_id: "stagnation_compliance_drift",
    alert_type: "compliance_drift",
    severity: Severity::High,
    message: "Compliance ratio shows a persistent negative drift.",
    recommendation: "Prioritize habit stabilization before raising threshold strictness.",
    confidence: 0.86,
};

const LOW_RECOVERY: AlertSpec = AlertSpec {
    alert_id: "stagnation_low_recovery_persistent",
    alert_type: "persistent_low_recovery",
    severity: Severity::High,
    message: "Recovery index remains below floor for three consecutive windows.",
    recommendation: "Reduce training stress and improve recovery inputs before progression.",
    confidence: 0.88,
};

/// Plateau and drift alerts over `recent_runs` (newest first), stamped with
/// `triggered_at`. Sorted by severity, then type.
pub fn detect_stagnation_alerts(
    recent_runs: &[DecisionRecord],
    min_points: usize,
    triggered_at: Date,
) -> Vec<StagnationAlert> {
    let min_points = min_points.max(1);
    let mut alerts = Vec::new();

    let trend = signal_series(recent_runs, "trend_slope");
    if trend.len() >= min_points {
        let tail = &trend[trend.len() - min_points..];
        let avg_abs = tail.iter().map(|v| v.abs()).sum::<f64>() / min_points as f64;
        if avg_abs <= FLAT_TREND_LIMIT {
            alerts.push(FLAT_TREND.raise(triggered_at));
        }
    }

    let overload = signal_series(recent_runs, "progressive_overload_score");
    if overload.len() >= OVERLOAD_POINTS {
        let tail = &overload[overload.len() - OVERLOAD_POINTS..];
        let max = tail.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = tail.iter().copied().fold(f64::INFINITY, f64::min);
        if max - min <= OVERLOAD_SPREAD_LIMIT {
            alerts.push(FLAT_OVERLOAD.raise(triggered_at));
        }
    }

    let compliance = signal_series(recent_runs, "compliance_ratio");
    if compliance.len() >= min_points
        && let (Some(oldest), Some(newest)) = (compliance.first(), compliance.last())
        && oldest - newest >= COMPLIANCE_DRIFT_LIMIT
    {
        alerts.push(COMPLIANCE_DRIFT.raise(triggered_at));
    }

    let recovery = signal_series(recent_runs, "recovery_index");
    if recovery.len() >= LOW_RECOVERY_POINTS
        && recovery[recovery.len() - LOW_RECOVERY_POINTS..]
            .iter()
            .all(|v| *v < LOW_RECOVERY_FLOOR)
    {
        alerts.push(LOW_RECOVERY.raise(triggered_at));
    }

    alerts.sort_by(|lhs, rhs| {
        lhs.severity
            .cmp(&rhs.severity)
            .then_with(|| lhs.alert_type.cmp(&rhs.alert_type))
    });
    alerts
}
