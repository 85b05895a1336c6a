use std::fs;

use anyhow::{Context, Result};
use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use alignment_engine::{
    cli::CliArgs,
    config::Config,
    engine::{RunRequest, run_and_persist, run_decision, validate_domain_definition},
    health::HealthDomain,
    logging::init_tracing,
    signals::ObservationLogs,
    store::JsonFileDecisionStore,
};

#[derive(Debug, Deserialize)]
struct RunFile {
    #[serde(flatten)]
    request: RunRequest<ObservationLogs>,
    /// Overrides the configured signal window anchor for this run.
    #[serde(default)]
    as_of: Option<Date>,
}

fn main() -> Result<()> {
    let args = CliArgs::from_env()?;
    let config = Config::load(&args.config_path)
        .with_context(|| format!("failed to load config from {}", args.config_path.display()))?;
    let logging_guard = init_tracing(&config.logging).context("failed to initialize logging")?;

    let request_text = fs::read_to_string(&args.request_path)
        .with_context(|| format!("failed to read {}", args.request_path.display()))?;
    let run_file: RunFile = serde_json::from_str(&request_text)
        .with_context(|| format!("failed to parse run request {}", args.request_path.display()))?;

    let mut signal_config = config.signals.clone();
    if run_file.as_of.is_some() {
        signal_config.as_of = run_file.as_of;
    }
    let domain = validate_domain_definition(HealthDomain::new(
        signal_config,
        config.engine.required_observation_days,
    ))?;

    let settings = &config.engine.run;
    let record = match &args.history_path {
        Some(history_path) => {
            let mut store = JsonFileDecisionStore::open(history_path)?;
            run_and_persist(&domain, &run_file.request, &mut store, settings)?
        }
        None => run_decision(&domain, &run_file.request, &[], settings)?
            .into_record(Uuid::now_v7().to_string()),
    };

    tracing::info!(
        target: "engine",
        run_id = %logging_guard.run_id(),
        decision_id = %record.decision_id,
        alignment_score = record.result.alignment_score,
        risk_score = record.result.risk_score,
        "cli_run_finished"
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&record).context("failed to encode decision record")?
    );
    Ok(())
}
