use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::{
    decision::record::DecisionRecord, insights::series::signal_series, math::round_to,
};

const WEEK_RUNS: usize = 7;
const PLANNED_SESSIONS: u32 = 7;
const MIN_SUFFICIENT_RUNS: usize = 3;
const FLAT_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityDirection {
    Improving,
    Worsening,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyInsight {
    pub week_start: Date,
    pub week_end: Date,
    pub planned_sessions: u32,
    pub completed_sessions: u32,
    pub compliance_pct: f64,
    pub compliance_avg_pct: f64,
    pub recovery_shift: Direction,
    pub volatility_direction: VolatilityDirection,
    pub overload_progress: Direction,
    pub data_sufficient: bool,
}

/// Week-over-week view of the last seven runs (newest first) ending `today`.
pub fn build_weekly_insight(recent_runs: &[DecisionRecord], today: Date) -> WeeklyInsight {
    let window = &recent_runs[..recent_runs.len().min(WEEK_RUNS)];

    let compliance = signal_series(window, "compliance_ratio");
    let recovery = signal_series(window, "recovery_index");
    let volatility = signal_series(window, "volatility_index");
    let overload = signal_series(window, "progressive_overload_score");

    let compliance_last = compliance.last().copied().unwrap_or(0.0);
    let compliance_avg = if compliance.is_empty() {
        0.0
    } else {
        compliance.iter().sum::<f64>() / compliance.len() as f64
    };

    let volatility_direction = match (volatility.first(), volatility.last()) {
        (Some(first), Some(last)) if volatility.len() >= 2 => {
            if last < first {
                VolatilityDirection::Improving
            } else {
                VolatilityDirection::Worsening
            }
        }
        _ => VolatilityDirection::Flat,
    };

    WeeklyInsight {
        week_start: today.checked_sub(Duration::days(6)).unwrap_or(Date::MIN),
        week_end: today,
        planned_sessions: PLANNED_SESSIONS,
        completed_sessions: (f64::from(PLANNED_SESSIONS) * compliance_last).round() as u32,
        compliance_pct: round_to(compliance_last * 100.0, 2),
        compliance_avg_pct: round_to(compliance_avg * 100.0, 2),
        recovery_shift: direction(&recovery),
        volatility_direction,
        overload_progress: direction(&overload),
        data_sufficient: window.len() >= MIN_SUFFICIENT_RUNS,
    }
}

fn direction(series: &[f64]) -> Direction {
    match (series.first(), series.last()) {
        (Some(start), Some(end)) if series.len() >= 2 => {
            if end - start > FLAT_EPSILON {
                Direction::Up
            } else if start - end > FLAT_EPSILON {
                Direction::Down
            } else {
                Direction::Flat
            }
        }
        _ => Direction::Flat,
    }
}
