use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    decision::types::{Evaluation, Recommendation, RiskCode, Thresholds},
    engine::error::{EngineError, contract_violation},
};

/// What the decision pipeline needs to know about a domain's signals.
pub trait SignalSource {
    /// Signal name to whether it could be computed.
    fn sufficiency(&self) -> BTreeMap<String, bool>;
    /// Relative dispersion feeding the stability component, if known.
    fn dispersion(&self) -> Option<f64>;
    /// Distinct days with at least one observation.
    fn observed_days(&self) -> u32;
    fn signal_payload(&self) -> Value;
    /// Anchor and bounds of the observation window the signals came from.
    fn window_payload(&self) -> Value {
        Value::Null
    }
}

/// Goal-specific evaluation. Implementations must be deterministic.
pub trait GoalStrategy {
    type Signals: SignalSource;

    fn goal_name(&self) -> &str;

    fn default_thresholds(&self) -> Thresholds;

    fn evaluate(&self, signals: &Self::Signals, target: &Thresholds) -> Evaluation;

    fn recommend(&self, evaluation: &Evaluation) -> Vec<Recommendation>;

    /// Signal-level rules applied on top of the evaluation's own risks.
    fn additional_risks(&self, _signals: &Self::Signals) -> Vec<RiskCode> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
    pub window_days: u32,
    pub required_observation_days: u32,
    #[serde(default)]
    pub default_targets: Thresholds,
}

/// Plug-in contract a domain implements to run on the engine.
pub trait DomainDefinition {
    type Logs: Serialize;
    type Signals: SignalSource;
    type Strategy: GoalStrategy<Signals = Self::Signals>;

    fn compute_signals(&self, logs: &Self::Logs, config: &DomainConfig) -> Self::Signals;

    fn get_strategy(&self, goal_type: &str) -> Result<Self::Strategy, EngineError>;

    fn get_domain_config(&self) -> DomainConfig;

    fn normalize_goal_type(&self, raw_goal_type: &str) -> String {
        raw_goal_type.trim().to_lowercase()
    }

    fn domain_name(&self) -> &str;

    fn domain_version(&self) -> &str;

    /// Domain settings that shape signal computation beyond [`DomainConfig`].
    fn settings_payload(&self) -> Value {
        Value::Null
    }
}

/// Composition-time guard run before a domain is handed to the engine.
pub fn validate_domain_definition<D: DomainDefinition>(domain: D) -> Result<D, EngineError> {
    if domain.domain_name().trim().is_empty() {
        return Err(contract_violation("domain_name cannot be empty"));
    }
    if domain.domain_version().trim().is_empty() {
        return Err(contract_violation(format!(
            "domain '{}' has an empty domain_version",
            domain.domain_name()
        )));
    }

    let config = domain.get_domain_config();
    if config.window_days == 0 {
        return Err(contract_violation(format!(
            "domain '{}' declares a zero window_days",
            domain.domain_name()
        )));
    }
    if config.required_observation_days == 0 {
        return Err(contract_violation(format!(
            "domain '{}' declares a zero required_observation_days",
            domain.domain_name()
        )));
    }

    Ok(domain)
}
