use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use time::Date;

use crate::engine::SignalSource;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLog {
    pub log_date: Date,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeLog {
    pub log_date: Date,
    pub calories_kcal: u32,
    #[serde(default)]
    pub protein_g: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    pub log_date: Date,
    pub session_type: String,
    #[serde(default)]
    pub duration_min: u32,
    #[serde(default)]
    pub volume_load: Option<f64>,
    #[serde(default)]
    pub avg_rpe: Option<f64>,
    #[serde(default = "default_true")]
    pub planned_flag: bool,
    #[serde(default = "default_true")]
    pub completed_flag: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationLogs {
    #[serde(default)]
    pub weight_logs: Vec<WeightLog>,
    #[serde(default)]
    pub intake_logs: Vec<IntakeLog>,
    #[serde(default)]
    pub training_sessions: Vec<TrainingSession>,
}

impl ObservationLogs {
    pub fn is_empty(&self) -> bool {
        self.weight_logs.is_empty()
            && self.intake_logs.is_empty()
            && self.training_sessions.is_empty()
    }

    pub fn latest_date(&self) -> Option<Date> {
        let weights = self.weight_logs.iter().map(|log| log.log_date);
        let intake = self.intake_logs.iter().map(|log| log.log_date);
        let sessions = self.training_sessions.iter().map(|session| session.log_date);
        weights.chain(intake).chain(sessions).max()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalName {
    TrendSlope,
    VolatilityIndex,
    ComplianceRatio,
    MuscleBalanceIndex,
    RecoveryIndex,
    ProgressiveOverloadScore,
}

impl SignalName {
    pub const ALL: [SignalName; 6] = [
        SignalName::TrendSlope,
        SignalName::VolatilityIndex,
        SignalName::ComplianceRatio,
        SignalName::MuscleBalanceIndex,
        SignalName::RecoveryIndex,
        SignalName::ProgressiveOverloadScore,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SignalName::TrendSlope => "trend_slope",
            SignalName::VolatilityIndex => "volatility_index",
            SignalName::ComplianceRatio => "compliance_ratio",
            SignalName::MuscleBalanceIndex => "muscle_balance_index",
            SignalName::RecoveryIndex => "recovery_index",
            SignalName::ProgressiveOverloadScore => "progressive_overload_score",
        }
    }
}

/// Date range and record counts the signals were computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationWindow {
    pub as_of: Option<Date>,
    pub start: Option<Date>,
    pub weight_log_count: usize,
    pub intake_log_count: usize,
    pub training_session_count: usize,
    pub observed_days: u32,
}

/// Six normalized signals plus per-signal sufficiency.
///
/// Sufficiency is derived from value presence at construction, so an absent
/// signal can never be flagged as computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalBundle {
    values: BTreeMap<SignalName, Option<f64>>,
    sufficiency: BTreeMap<SignalName, bool>,
    window: ObservationWindow,
}

impl SignalBundle {
    pub fn from_signals(signals: impl IntoIterator<Item = (SignalName, Option<f64>)>) -> Self {
        let mut values: BTreeMap<SignalName, Option<f64>> =
            SignalName::ALL.iter().map(|name| (*name, None)).collect();
        for (name, value) in signals {
            values.insert(name, value.filter(|v| v.is_finite()));
        }
        let sufficiency = values
            .iter()
            .map(|(name, value)| (*name, value.is_some()))
            .collect();

        Self {
            values,
            sufficiency,
            window: ObservationWindow::default(),
        }
    }

    pub fn empty() -> Self {
        Self::from_signals(std::iter::empty())
    }

    pub fn with_window(mut self, window: ObservationWindow) -> Self {
        self.window = window;
        self
    }

    pub fn get(&self, name: SignalName) -> Option<f64> {
        self.values.get(&name).copied().flatten()
    }

    pub fn trend_slope(&self) -> Option<f64> {
        self.get(SignalName::TrendSlope)
    }

    pub fn volatility_index(&self) -> Option<f64> {
        self.get(SignalName::VolatilityIndex)
    }

    pub fn compliance_ratio(&self) -> Option<f64> {
        self.get(SignalName::ComplianceRatio)
    }

    pub fn muscle_balance_index(&self) -> Option<f64> {
        self.get(SignalName::MuscleBalanceIndex)
    }

    pub fn recovery_index(&self) -> Option<f64> {
        self.get(SignalName::RecoveryIndex)
    }

    pub fn progressive_overload_score(&self) -> Option<f64> {
        self.get(SignalName::ProgressiveOverloadScore)
    }

    pub fn window(&self) -> &ObservationWindow {
        &self.window
    }

    pub fn missing_count(&self) -> usize {
        self.sufficiency.values().filter(|ok| !**ok).count()
    }
}

impl SignalSource for SignalBundle {
    fn sufficiency(&self) -> BTreeMap<String, bool> {
        self.sufficiency
            .iter()
            .map(|(name, ok)| (name.as_str().to_string(), *ok))
            .collect()
    }

    fn dispersion(&self) -> Option<f64> {
        self.volatility_index()
    }

    fn observed_days(&self) -> u32 {
        self.window.observed_days
    }

    fn signal_payload(&self) -> Value {
        let mut payload = serde_json::Map::new();
        for name in SignalName::ALL {
            payload.insert(name.as_str().to_string(), json!(self.get(name)));
        }
        payload.insert(
            "sufficiency".to_string(),
            json!(SignalSource::sufficiency(self)),
        );
        payload.insert("window".to_string(), json!(self.window));
        Value::Object(payload)
    }

    fn window_payload(&self) -> Value {
        json!(self.window)
    }
}
