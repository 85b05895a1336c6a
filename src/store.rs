use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::{
    decision::record::{DecisionRecord, GovernedDecision},
    engine::{
        DecisionStore,
        error::{EngineError, storage_error},
    },
};

/// Decision records kept as a JSON array on disk, oldest first.
#[derive(Debug, Clone)]
pub struct JsonFileDecisionStore {
    path: PathBuf,
    records: Vec<DecisionRecord>,
}

impl JsonFileDecisionStore {
    /// Opens `path`, treating a missing file as an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        let records = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse decision records in {}", path.display()))?
        } else {
            Vec::new()
        };

        tracing::debug!(
            target: "store",
            path = %path.display(),
            records = records.len(),
            "decision_store_opened"
        );
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    pub fn records(&self) -> &[DecisionRecord] {
        &self.records
    }

    fn flush(&self) -> Result<(), EngineError> {
        let content = serde_json::to_string_pretty(&self.records)
            .map_err(|err| storage_error(format!("failed to encode decision records: {err}")))?;
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, content)
            .map_err(|err| storage_error(format!("failed to write {}: {err}", staging.display())))?;
        fs::rename(&staging, &self.path).map_err(|err| {
            storage_error(format!("failed to replace {}: {err}", self.path.display()))
        })
    }
}

impl DecisionStore for JsonFileDecisionStore {
    fn recent_runs(&self, user_id: &str, limit: usize) -> Result<Vec<DecisionRecord>, EngineError> {
        Ok(self
            .records
            .iter()
            .rev()
            .filter(|record| record.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }

    fn persist(&mut self, decision: GovernedDecision) -> Result<DecisionRecord, EngineError> {
        let record = decision.into_record(Uuid::now_v7().to_string());
        self.records.push(record.clone());
        if let Err(err) = self.flush() {
            self.records.pop();
            return Err(err);
        }
        tracing::info!(
            target: "store",
            decision_id = %record.decision_id,
            user_id = %record.user_id,
            "decision_persisted"
        );
        Ok(record)
    }
}
