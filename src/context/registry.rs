use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::{
    context::{
        cycle::CycleContext,
        types::{ContextInput, ContextModulator, ContextResult},
    },
    decision::types::Thresholds,
};

const DEFAULT_CONTEXT_TYPE: &str = "cycle";

/// Routes `input` to its modulator. Absent or unsupported context leaves the
/// thresholds untouched.
pub fn apply_context(
    goal_type: &str,
    base_thresholds: &Thresholds,
    score_inputs: &BTreeMap<String, f64>,
    input: Option<&ContextInput>,
) -> ContextResult {
    let Some(input) = input.filter(|input| !input.is_empty()) else {
        return ContextResult::pass_through(
            base_thresholds,
            BTreeMap::from([("context_type".to_string(), Value::Null)]),
        );
    };

    let context_type = input
        .context_type
        .as_deref()
        .unwrap_or(DEFAULT_CONTEXT_TYPE)
        .to_lowercase();
    let cycle = CycleContext;
    let has_phase = input.phase.as_deref().is_some_and(|phase| !phase.is_empty());
    if context_type == cycle.context_type() || has_phase {
        return cycle.apply(goal_type, base_thresholds, score_inputs, input);
    }

    tracing::debug!(target: "context", context_type = %context_type, "context_type_unsupported");
    ContextResult::pass_through(
        base_thresholds,
        BTreeMap::from([("context_type".to_string(), json!(context_type))]),
    )
    .with_note(format!("Unsupported context_type '{context_type}' ignored."))
}
