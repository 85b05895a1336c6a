use serde_json::{Value, json};

use crate::{
    decision::types::Thresholds,
    engine::{
        DomainConfig, DomainDefinition,
        error::EngineError,
    },
    signals::{ObservationLogs, SignalBundle, SignalConfig, compute_signals},
    strategies::{GoalType, HealthStrategy},
};

pub const DOMAIN_NAME: &str = "health";
pub const DOMAIN_VERSION: &str = "health_v1";
pub const DEFAULT_REQUIRED_OBSERVATION_DAYS: u32 = 7;

pub fn default_health_targets() -> Thresholds {
    [
        ("min_compliance", 0.8),
        ("min_recovery", 0.55),
        ("max_volatility", 0.08),
        ("min_overload", 0.65),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect()
}

/// The health goal domain: observation logs in, [`HealthStrategy`] out.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthDomain {
    signals: SignalConfig,
    required_observation_days: u32,
}

impl Default for HealthDomain {
    fn default() -> Self {
        Self::new(SignalConfig::default(), DEFAULT_REQUIRED_OBSERVATION_DAYS)
    }
}

impl HealthDomain {
    pub fn new(signals: SignalConfig, required_observation_days: u32) -> Self {
        Self {
            signals,
            required_observation_days,
        }
    }

    pub fn signal_config(&self) -> &SignalConfig {
        &self.signals
    }
}

impl DomainDefinition for HealthDomain {
    type Logs = ObservationLogs;
    type Signals = SignalBundle;
    type Strategy = HealthStrategy;

    fn compute_signals(&self, logs: &ObservationLogs, config: &DomainConfig) -> SignalBundle {
        let signal_config = SignalConfig {
            lookback_days: config.window_days,
            ..self.signals.clone()
        };
        compute_signals(logs, &signal_config)
    }

    fn get_strategy(&self, goal_type: &str) -> Result<HealthStrategy, EngineError> {
        let goal_type: GoalType = goal_type.parse()?;
        Ok(HealthStrategy::for_goal(goal_type))
    }

    fn get_domain_config(&self) -> DomainConfig {
        DomainConfig {
            window_days: self.signals.lookback_days,
            required_observation_days: self.required_observation_days,
            default_targets: default_health_targets(),
        }
    }

    fn domain_name(&self) -> &str {
        DOMAIN_NAME
    }

    fn domain_version(&self) -> &str {
        DOMAIN_VERSION
    }

    fn settings_payload(&self) -> Value {
        json!({
            "signals": self.signals,
            "required_observation_days": self.required_observation_days,
        })
    }
}
