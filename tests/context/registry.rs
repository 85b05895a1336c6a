use std::collections::BTreeMap;

use alignment_engine::context::{ContextInput, apply_context};
use serde_json::{Value, json};

use crate::{assert_close, base_thresholds};

#[test]
fn given_no_context_when_apply_context_then_pass_through() {
    let base = base_thresholds();
    let result = apply_context("weight_loss", &base, &BTreeMap::new(), None);

    assert!(!result.context_applied);
    assert_eq!(result.modulated_thresholds, base);
    assert_eq!(base, base_thresholds());
    assert_close(result.priority_score_scale(), 1.0);
    assert!(result.notes.is_empty());
    assert_eq!(result.metadata.get("context_type"), Some(&Value::Null));
}

#[test]
fn given_empty_context_object_when_apply_context_then_pass_through() {
    let result = apply_context(
        "weight_loss",
        &base_thresholds(),
        &BTreeMap::new(),
        Some(&ContextInput::default()),
    );

    assert!(!result.context_applied);
    assert_eq!(result.modulated_thresholds, base_thresholds());
}

#[test]
fn given_unknown_phase_when_apply_context_then_pass_through() {
    let result = apply_context(
        "weight_loss",
        &base_thresholds(),
        &BTreeMap::new(),
        Some(&ContextInput::phase("hibernation")),
    );

    assert!(!result.context_applied);
    assert_eq!(result.modulated_thresholds, base_thresholds());
    assert_eq!(result.metadata.get("phase"), Some(&Value::Null));
}

#[test]
fn given_unsupported_context_type_when_apply_context_then_noted_and_ignored() {
    let input: ContextInput =
        serde_json::from_value(json!({"context_type": "Altitude", "elevation_m": 2400}))
            .expect("context should deserialize");
    assert_eq!(input.extra.get("elevation_m"), Some(&json!(2400)));

    let result = apply_context("weight_loss", &base_thresholds(), &BTreeMap::new(), Some(&input));

    assert!(!result.context_applied);
    assert_eq!(result.modulated_thresholds, base_thresholds());
    assert_eq!(
        result.notes,
        vec!["Unsupported context_type 'altitude' ignored.".to_string()]
    );
}
