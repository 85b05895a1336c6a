use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::decision::types::Thresholds;

pub const CONTEXT_VERSION: &str = "ctx_v1";
pub const PRIORITY_SCORE_SCALE: &str = "priority_score_scale";

/// Caller-supplied auxiliary context. Unknown fields are kept for the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ContextInput {
    pub fn phase(phase: impl Into<String>) -> Self {
        Self {
            phase: Some(phase.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.context_type.is_none() && self.phase.is_none() && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextResult {
    pub modulated_thresholds: Thresholds,
    pub penalty_scalars: BTreeMap<String, f64>,
    pub tolerance_adjustments: BTreeMap<String, f64>,
    pub context_applied: bool,
    pub notes: Vec<String>,
    pub context_version: String,
    pub metadata: BTreeMap<String, Value>,
}

impl ContextResult {
    /// Unmodified copy of `base` with a neutral priority scale.
    pub fn pass_through(base: &Thresholds, metadata: BTreeMap<String, Value>) -> Self {
        Self {
            modulated_thresholds: base.clone(),
            penalty_scalars: neutral_scalars(),
            tolerance_adjustments: BTreeMap::new(),
            context_applied: false,
            notes: Vec::new(),
            context_version: CONTEXT_VERSION.to_string(),
            metadata,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn priority_score_scale(&self) -> f64 {
        self.penalty_scalars
            .get(PRIORITY_SCORE_SCALE)
            .copied()
            .unwrap_or(1.0)
    }

    /// Audit payload recorded in the trace.
    pub fn payload(&self) -> Value {
        json!({
            "modulated_thresholds": self.modulated_thresholds,
            "penalty_scalars": self.penalty_scalars,
            "tolerance_adjustments": self.tolerance_adjustments,
            "metadata": self.metadata,
        })
    }
}

pub(crate) fn neutral_scalars() -> BTreeMap<String, f64> {
    BTreeMap::from([(PRIORITY_SCORE_SCALE.to_string(), 1.0)])
}

/// Adjusts goal thresholds for one kind of auxiliary context.
pub trait ContextModulator {
    fn context_type(&self) -> &'static str;

    fn apply(
        &self,
        goal_type: &str,
        base_thresholds: &Thresholds,
        score_inputs: &BTreeMap<String, f64>,
        input: &ContextInput,
    ) -> ContextResult;
}
