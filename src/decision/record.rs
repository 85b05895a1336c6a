use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    decision::types::Recommendation,
    engine::error::{EngineError, serialization_error},
    explain::Trace,
    governance::GovernanceRecord,
    scoring::{ConfidenceBreakdown, HistoryEntry, RecommendationConfidence},
};

/// Output of one decision run. Consumed, never edited, when governance is
/// attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub alignment_score: f64,
    pub risk_score: f64,
    pub recommendations: Vec<Recommendation>,
    pub trace: Trace,
    pub alignment_confidence: f64,
    pub recommendation_confidence: Vec<RecommendationConfidence>,
    pub confidence_breakdown: ConfidenceBreakdown,
    pub confidence_version: String,
    pub context_applied: bool,
    pub context_notes: Vec<String>,
    pub context_version: String,
    pub context_json: Value,
    pub engine_version: String,
}

impl DecisionResult {
    /// Serialized result without the governance block; this is what gets
    /// hashed.
    pub fn output_payload(&self) -> Result<Value, EngineError> {
        let mut payload = serde_json::to_value(self)
            .map_err(|err| serialization_error(format!("decision result: {err}")))?;
        if let Some(trace) = payload.get_mut("trace").and_then(Value::as_object_mut) {
            trace.remove("governance");
        }
        Ok(payload)
    }

    pub fn with_governance(mut self, governance: GovernanceRecord) -> Self {
        self.trace.governance = Some(governance);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernedDecision {
    pub user_id: String,
    pub result: DecisionResult,
    pub governance: GovernanceRecord,
}

impl GovernedDecision {
    pub fn into_record(self, decision_id: impl Into<String>) -> DecisionRecord {
        DecisionRecord {
            decision_id: decision_id.into(),
            user_id: self.user_id,
            result: self.result,
            governance: self.governance,
        }
    }
}

/// A persisted run, as handed back by the decision store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decision_id: String,
    pub user_id: String,
    pub result: DecisionResult,
    pub governance: GovernanceRecord,
}

impl DecisionRecord {
    /// Deviation flags this run recorded, for persistence scoring.
    pub fn history_entry(&self) -> HistoryEntry {
        let deviations = self
            .result
            .trace
            .computed_signals
            .get("deviations")
            .and_then(|value| serde_json::from_value::<BTreeMap<String, bool>>(value.clone()).ok())
            .unwrap_or_default();
        HistoryEntry { deviations }
    }

    /// A numeric signal recorded in this run's trace, if it was computed.
    pub fn signal_value(&self, name: &str) -> Option<f64> {
        self.result
            .trace
            .computed_signals
            .get(name)
            .and_then(Value::as_f64)
    }
}
