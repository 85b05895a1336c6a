use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::signals::{
    balance::{default_target_distribution, muscle_balance_index},
    compliance::compliance_from_sessions,
    overload::progressive_overload_score,
    recovery::recovery_from_sessions,
    trend::linear_regression_slope,
    types::{ObservationLogs, ObservationWindow, SignalBundle, SignalName, TrainingSession},
    volatility::coefficient_of_variation,
};

fn default_lookback_days() -> u32 {
    28
}

fn default_recovery_window_days() -> u32 {
    7
}

fn default_high_intensity_rpe() -> f64 {
    8.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    #[serde(default = "default_recovery_window_days")]
    pub recovery_window_days: u32,
    #[serde(default = "default_high_intensity_rpe")]
    pub high_intensity_rpe: f64,
    /// Window anchor. Defaults to the latest logged date.
    #[serde(default)]
    pub as_of: Option<Date>,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            recovery_window_days: default_recovery_window_days(),
            high_intensity_rpe: default_high_intensity_rpe(),
            as_of: None,
        }
    }
}

pub fn compute_signals(logs: &ObservationLogs, config: &SignalConfig) -> SignalBundle {
    let Some(as_of) = config.as_of.or_else(|| logs.latest_date()) else {
        tracing::debug!(target: "signals", "signals_skipped_no_logs");
        return SignalBundle::empty();
    };
    let start = window_start(as_of, config.lookback_days);
    let in_window = |date: Date| date >= start && date <= as_of;

    let mut weights: Vec<_> = logs
        .weight_logs
        .iter()
        .filter(|log| in_window(log.log_date))
        .collect();
    weights.sort_by_key(|log| log.log_date);
    let mut intake: Vec<_> = logs
        .intake_logs
        .iter()
        .filter(|log| in_window(log.log_date))
        .collect();
    intake.sort_by_key(|log| log.log_date);
    let mut sessions: Vec<&TrainingSession> = logs
        .training_sessions
        .iter()
        .filter(|session| in_window(session.log_date))
        .collect();
    sessions.sort_by_key(|session| session.log_date);

    let weight_series: Vec<f64> = weights.iter().map(|log| log.weight_kg).collect();
    let volume_series: Vec<f64> = sessions.iter().filter_map(|s| s.volume_load).collect();

    let recovery_start = window_start(as_of, config.recovery_window_days);
    let recent_sessions: Vec<&TrainingSession> = sessions
        .iter()
        .copied()
        .filter(|session| session.log_date >= recovery_start)
        .collect();

    let observed_days: BTreeSet<Date> = weights
        .iter()
        .map(|log| log.log_date)
        .chain(intake.iter().map(|log| log.log_date))
        .chain(sessions.iter().map(|session| session.log_date))
        .collect();

    let window = ObservationWindow {
        as_of: Some(as_of),
        start: Some(start),
        weight_log_count: weights.len(),
        intake_log_count: intake.len(),
        training_session_count: sessions.len(),
        observed_days: u32::try_from(observed_days.len()).unwrap_or(u32::MAX),
    };

    let bundle = SignalBundle::from_signals([
        (
            SignalName::TrendSlope,
            linear_regression_slope(&weight_series),
        ),
        (
            SignalName::VolatilityIndex,
            coefficient_of_variation(&weight_series),
        ),
        (
            SignalName::ComplianceRatio,
            compliance_from_sessions(&sessions),
        ),
        (
            SignalName::MuscleBalanceIndex,
            muscle_balance_index(
                sessions.iter().map(|s| s.session_type.as_str()),
                &default_target_distribution(),
            ),
        ),
        (
            SignalName::RecoveryIndex,
            recovery_from_sessions(
                &recent_sessions,
                config.recovery_window_days,
                config.high_intensity_rpe,
            ),
        ),
        (
            SignalName::ProgressiveOverloadScore,
            progressive_overload_score(&volume_series),
        ),
    ])
    .with_window(window);

    tracing::debug!(
        target: "signals",
        as_of = %as_of,
        observed_days = bundle.window().observed_days,
        missing = bundle.missing_count(),
        "signals_computed"
    );
    bundle
}

/// First date of an inclusive `days`-long window ending at `as_of`.
fn window_start(as_of: Date, days: u32) -> Date {
    let span = i64::from(days.max(1) - 1);
    as_of
        .checked_sub(Duration::days(span))
        .unwrap_or(Date::MIN)
}
