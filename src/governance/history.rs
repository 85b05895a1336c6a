use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{decision::record::DecisionRecord, math::round_to};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub count: usize,
    pub alignment_trend: Vec<f64>,
    pub confidence_trend: Vec<f64>,
    pub context_application_frequency: f64,
    pub rule_trigger_distribution: BTreeMap<String, usize>,
    pub determinism_pass_rate: f64,
}

/// Aggregates runs in the order given.
pub fn summarize_history(runs: &[DecisionRecord]) -> HistorySummary {
    let mut rule_trigger_distribution = BTreeMap::new();
    for run in runs {
        for rule in &run.result.trace.triggered_rules {
            *rule_trigger_distribution
                .entry(rule.as_str().to_string())
                .or_insert(0usize) += 1;
        }
    }

    let context_applied = runs.iter().filter(|run| run.result.context_applied).count();
    let checked = runs
        .iter()
        .filter(|run| run.governance.determinism_verified.is_some())
        .count();
    let verified = runs
        .iter()
        .filter(|run| run.governance.determinism_verified == Some(true))
        .count();

    HistorySummary {
        count: runs.len(),
        alignment_trend: runs.iter().map(|run| run.result.alignment_score).collect(),
        confidence_trend: runs
            .iter()
            .map(|run| run.result.alignment_confidence)
            .collect(),
        context_application_frequency: round_to(ratio(context_applied, runs.len()), 4),
        rule_trigger_distribution,
        determinism_pass_rate: round_to(ratio(verified, checked), 4),
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}
