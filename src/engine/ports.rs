use crate::{
    decision::record::{DecisionRecord, GovernedDecision},
    engine::error::EngineError,
};

/// Storage boundary for decision runs. The store assigns decision ids.
pub trait DecisionStore {
    /// Up to `limit` of the user's runs, newest first.
    fn recent_runs(&self, user_id: &str, limit: usize) -> Result<Vec<DecisionRecord>, EngineError>;

    fn persist(&mut self, decision: GovernedDecision) -> Result<DecisionRecord, EngineError>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDecisionStore {
    records: Vec<DecisionRecord>,
}

impl InMemoryDecisionStore {
    pub fn records(&self) -> &[DecisionRecord] {
        &self.records
    }
}

impl DecisionStore for InMemoryDecisionStore {
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
        let record = decision.into_record(format!("run-{}", self.records.len() + 1));
        self.records.push(record.clone());
        Ok(record)
    }
}
