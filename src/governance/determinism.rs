use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{decision::record::DecisionRecord, governance::hashing::canonical_hash};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeterminismReason {
    NoBaseline,
    Match,
    Mismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceRecord {
    pub input_signature_hash: String,
    pub output_hash: String,
    /// `None` when no prior run with the same signature exists.
    pub determinism_verified: Option<bool>,
    pub determinism_reason: DeterminismReason,
    #[serde(default)]
    pub baseline_decision_id: Option<String>,
}

/// Prior output a new run is compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub decision_id: Option<String>,
    pub output_hash: String,
}

impl Baseline {
    pub fn from_payload(output_payload: &Value) -> Self {
        Self {
            decision_id: None,
            output_hash: canonical_hash(output_payload),
        }
    }

    pub fn from_record(record: &DecisionRecord) -> Self {
        Self {
            decision_id: Some(record.decision_id.clone()),
            output_hash: record.governance.output_hash.clone(),
        }
    }
}

pub fn verify_determinism(
    input_signature: &Value,
    output_payload: &Value,
    baseline: Option<&Baseline>,
) -> GovernanceRecord {
    let input_signature_hash = canonical_hash(input_signature);
    let output_hash = canonical_hash(output_payload);

    let Some(baseline) = baseline else {
        return GovernanceRecord {
            input_signature_hash,
            output_hash,
            determinism_verified: None,
            determinism_reason: DeterminismReason::NoBaseline,
            baseline_decision_id: None,
        };
    };

    let matches = baseline.output_hash == output_hash;
    if !matches {
        tracing::warn!(
            target: "governance",
            input_signature_hash = %input_signature_hash,
            baseline_decision_id = ?baseline.decision_id,
            "determinism_mismatch"
        );
    }

    GovernanceRecord {
        input_signature_hash,
        output_hash,
        determinism_verified: Some(matches),
        determinism_reason: if matches {
            DeterminismReason::Match
        } else {
            DeterminismReason::Mismatch
        },
        baseline_decision_id: baseline.decision_id.clone(),
    }
}

/// Most recent prior run (newest first) recorded under `input_signature_hash`.
pub fn find_baseline<'a>(
    recent_runs: &'a [DecisionRecord],
    input_signature_hash: &str,
) -> Option<&'a DecisionRecord> {
    recent_runs
        .iter()
        .find(|run| run.governance.input_signature_hash == input_signature_hash)
}
