use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    context::ContextInput,
    decision::{
        record::{DecisionRecord, GovernedDecision},
        types::Thresholds,
    },
    engine::{
        contracts::{DomainDefinition, GoalStrategy, SignalSource},
        error::{EngineError, invalid_target, no_active_goal, serialization_error},
        pipeline::{RunInputs, evaluate_and_decide},
        ports::DecisionStore,
    },
    governance::{Baseline, canonical_hash, find_baseline, verify_determinism},
    scoring::{HistoryEntry, confidence::DEFAULT_SMOOTHING_ALPHA},
};

fn default_engine_version() -> String {
    "v5".to_string()
}

fn default_smoothing_alpha() -> f64 {
    DEFAULT_SMOOTHING_ALPHA
}

fn default_history_limit() -> usize {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    #[serde(default = "default_engine_version")]
    pub engine_version: String,
    #[serde(default = "default_smoothing_alpha")]
    pub smoothing_alpha: f64,
    /// Prior runs considered for history, smoothing and baselines.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            engine_version: default_engine_version(),
            smoothing_alpha: default_smoothing_alpha(),
            history_limit: default_history_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveGoal {
    pub goal_type: String,
    #[serde(default)]
    pub target: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest<L> {
    pub user_id: String,
    #[serde(default)]
    pub goal: Option<ActiveGoal>,
    pub logs: L,
    #[serde(default)]
    pub context: Option<ContextInput>,
}

/// Numeric view of a goal target. Non-numeric values are rejected.
pub fn thresholds_from_target(target: &BTreeMap<String, Value>) -> Result<Thresholds, EngineError> {
    target
        .iter()
        .map(|(key, value)| {
            value
                .as_f64()
                .filter(|number| number.is_finite())
                .map(|number| (key.clone(), number))
                .ok_or_else(|| {
                    invalid_target(format!("target '{key}' must be a finite number, got {value}"))
                })
        })
        .collect()
}

/// Full governed run: `recent_runs` are the user's prior records, newest first.
pub fn run_decision<D: DomainDefinition>(
    domain: &D,
    request: &RunRequest<D::Logs>,
    recent_runs: &[DecisionRecord],
    settings: &RunSettings,
) -> Result<GovernedDecision, EngineError> {
    let goal = request.goal.as_ref().ok_or_else(|| {
        no_active_goal(format!("no active goal for user '{}'", request.user_id))
    })?;
    let goal_type = domain.normalize_goal_type(&goal.goal_type);
    let strategy = domain.get_strategy(&goal_type)?;
    let target = thresholds_from_target(&goal.target)?;

    let config = domain.get_domain_config();
    let signals = domain.compute_signals(&request.logs, &config);

    let window = &recent_runs[..recent_runs.len().min(settings.history_limit)];
    let history: Vec<HistoryEntry> = window.iter().map(DecisionRecord::history_entry).collect();
    let previous_confidence = window.first().map(|run| run.result.alignment_confidence);

    let logs = serde_json::to_value(&request.logs)
        .map_err(|err| serialization_error(format!("run logs: {err}")))?;
    let input_signature = json!({
        "user_id": request.user_id,
        "goal_type": goal_type,
        "target": target,
        "context": request.context,
        "logs": logs,
        "window": signals.window_payload(),
        "domain": {
            "name": domain.domain_name(),
            "version": domain.domain_version(),
            "config": config,
            "settings": domain.settings_payload(),
        },
        "engine": {
            "engine_version": settings.engine_version,
            "smoothing_alpha": settings.smoothing_alpha,
        },
        "history": history,
        "previous_alignment_confidence": previous_confidence,
    });
    let input_signature_hash = canonical_hash(&input_signature);

    // Zero observed days scores as a complete window.
    let observed_days = signals.observed_days();
    let available_observations = if observed_days > 0 {
        observed_days
    } else {
        config.required_observation_days
    };

    let input_summary = json!({
        "user_id": request.user_id,
        "goal_type": goal_type,
        "domain": domain.domain_name(),
        "domain_version": domain.domain_version(),
        "target": target,
        "observed_days": observed_days,
        "history_runs": history.len(),
    });

    let result = evaluate_and_decide(
        &strategy,
        &signals,
        RunInputs {
            target: &target,
            context: request.context.as_ref(),
            history: &history,
            previous_confidence,
            smoothing_alpha: settings.smoothing_alpha,
            available_observations,
            required_observations: config.required_observation_days,
            input_summary,
            engine_version: &settings.engine_version,
        },
    );

    let output_payload = result.output_payload()?;
    let baseline = find_baseline(window, &input_signature_hash).map(Baseline::from_record);
    let governance = verify_determinism(&input_signature, &output_payload, baseline.as_ref());

    tracing::info!(
        target: "engine",
        user_id = %request.user_id,
        goal_type = %goal_type,
        strategy = %strategy.goal_name(),
        alignment_score = result.alignment_score,
        alignment_confidence = result.alignment_confidence,
        determinism_reason = ?governance.determinism_reason,
        "decision_run_completed"
    );

    Ok(GovernedDecision {
        user_id: request.user_id.clone(),
        result: result.with_governance(governance.clone()),
        governance,
    })
}

/// Loads prior runs from `store`, runs, and persists the outcome.
pub fn run_and_persist<D: DomainDefinition, S: DecisionStore>(
    domain: &D,
    request: &RunRequest<D::Logs>,
    store: &mut S,
    settings: &RunSettings,
) -> Result<DecisionRecord, EngineError> {
    let recent_runs = store.recent_runs(&request.user_id, settings.history_limit)?;
    let decision = run_decision(domain, request, &recent_runs, settings)?;
    store.persist(decision)
}
