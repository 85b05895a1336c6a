#![allow(dead_code)]

use std::collections::BTreeMap;

use alignment_engine::{
    context::ContextInput,
    decision::record::DecisionRecord,
    engine::{ActiveGoal, InMemoryDecisionStore, RunRequest, RunSettings, run_and_persist},
    health::HealthDomain,
    signals::{IntakeLog, ObservationLogs, SignalConfig, TrainingSession, WeightLog},
};
use serde_json::Value;
use time::{Date, Duration, macros::date};

pub const USER_ID: &str = "user-1";
pub const AS_OF: Date = date!(2026 - 03 - 28);

pub fn day(offset_back: i64) -> Date {
    AS_OF - Duration::days(offset_back)
}

pub fn health_domain() -> HealthDomain {
    HealthDomain::new(
        SignalConfig {
            as_of: Some(AS_OF),
            ..SignalConfig::default()
        },
        7,
    )
}

/// Two weeks of logs; `missed_every` marks every n-th planned session skipped.
pub fn sample_logs(missed_every: usize) -> ObservationLogs {
    let weight_logs = (0..14)
        .map(|i| WeightLog {
            log_date: day(13 - i),
            weight_kg: 84.0 - 0.05 * i as f64 + if i % 3 == 0 { 0.4 } else { 0.0 },
        })
        .collect();
    let intake_logs = (0..14)
        .map(|i| IntakeLog {
            log_date: day(13 - i),
            calories_kcal: 2200 + 25 * (i as u32 % 4),
            protein_g: Some(140),
        })
        .collect();
    let kinds = ["upper", "legs", "back", "core", "push"];
    let training_sessions = (0..10usize)
        .map(|i| TrainingSession {
            log_date: day(13 - i as i64),
            session_type: kinds[i % kinds.len()].to_string(),
            duration_min: 55,
            volume_load: Some(4800.0 + 60.0 * i as f64),
            avg_rpe: Some(if i % 2 == 0 { 8.5 } else { 7.0 }),
            planned_flag: true,
            completed_flag: missed_every == 0 || i % missed_every != 0,
        })
        .collect();

    ObservationLogs {
        weight_logs,
        intake_logs,
        training_sessions,
    }
}

pub fn request(goal_type: &str, logs: ObservationLogs) -> RunRequest<ObservationLogs> {
    RunRequest {
        user_id: USER_ID.to_string(),
        goal: Some(ActiveGoal {
            goal_type: goal_type.to_string(),
            target: BTreeMap::new(),
        }),
        logs,
        context: None,
    }
}

pub fn luteal_request(goal_type: &str, logs: ObservationLogs) -> RunRequest<ObservationLogs> {
    RunRequest {
        context: Some(ContextInput::phase("luteal")),
        ..request(goal_type, logs)
    }
}

pub fn settings() -> RunSettings {
    RunSettings::default()
}

/// Persists `count` runs with slowly degrading compliance and returns them
/// newest first.
pub fn persisted_runs(count: usize) -> Vec<DecisionRecord> {
    let domain = health_domain();
    let mut store = InMemoryDecisionStore::default();
    for index in 0..count {
        let missed_every = count + 2 - index;
        run_and_persist(
            &domain,
            &request("general_health", sample_logs(missed_every)),
            &mut store,
            &settings(),
        )
        .expect("run should persist");
    }
    let mut records = store.records().to_vec();
    records.reverse();
    records
}

/// Copy of `record` with trace signals replaced.
pub fn with_signals(record: &DecisionRecord, signals: &[(&str, Value)]) -> DecisionRecord {
    let mut record = record.clone();
    if let Some(computed) = record.result.trace.computed_signals.as_object_mut() {
        for (name, value) in signals {
            computed.insert(name.to_string(), value.clone());
        }
    }
    record
}
