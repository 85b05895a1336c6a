use std::fs;

use alignment_engine::{
    engine::{DecisionStore, EngineErrorKind, run_and_persist},
    store::JsonFileDecisionStore,
};
use uuid::Uuid;

use crate::support::{USER_ID, health_domain, request, sample_logs, settings};

#[test]
fn given_file_store_when_persist_then_records_survive_reopen() {
    let dir = std::env::temp_dir().join(format!("alignment-store-test-{}", Uuid::now_v7()));
    fs::create_dir_all(&dir).expect("temp dir should exist");
    let path = dir.join("decisions.json");

    let domain = health_domain();
    let mut store = JsonFileDecisionStore::open(&path).expect("missing file opens empty");
    assert!(store.records().is_empty());

    let first = run_and_persist(&domain, &request("recomposition", sample_logs(3)), &mut store, &settings())
        .expect("first run");
    let second = run_and_persist(&domain, &request("recomposition", sample_logs(3)), &mut store, &settings())
        .expect("second run");

    let reopened = JsonFileDecisionStore::open(&path).expect("store reopens");
    let recent = reopened.recent_runs(USER_ID, 10).expect("recent runs");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].decision_id, second.decision_id);
    assert_eq!(recent[1].decision_id, first.decision_id);
    assert_eq!(recent[0].governance, second.governance);
    assert_eq!(reopened.recent_runs(USER_ID, 1).expect("recent runs").len(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn given_corrupt_file_when_open_then_error() {
    let dir = std::env::temp_dir().join(format!("alignment-store-test-{}", Uuid::now_v7()));
    fs::create_dir_all(&dir).expect("temp dir should exist");
    let path = dir.join("decisions.json");
    fs::write(&path, "{not json").expect("file written");

    let err = JsonFileDecisionStore::open(&path).expect_err("corrupt file must fail");
    assert!(err.to_string().contains("failed to parse decision records"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn given_unwritable_path_when_persist_then_record_not_kept_in_memory() {
    let dir = std::env::temp_dir().join(format!("alignment-store-test-{}", Uuid::now_v7()));
    let path = dir.join("missing").join("decisions.json");

    let mut store = JsonFileDecisionStore::open(&path).expect("missing file opens empty");
    let err = run_and_persist(
        &health_domain(),
        &request("general_health", sample_logs(3)),
        &mut store,
        &settings(),
    )
    .expect_err("write into a missing directory must fail");

    assert_eq!(err.kind, EngineErrorKind::Storage);
    assert!(store.records().is_empty());
    assert!(store.recent_runs(USER_ID, 10).expect("recent runs").is_empty());
}
