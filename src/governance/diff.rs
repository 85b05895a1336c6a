use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{decision::record::DecisionRecord, math::round_to};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub alignment_score_delta: f64,
    pub risk_score_delta: f64,
    pub alignment_confidence_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankShift {
    pub id: String,
    pub from_priority: u32,
    pub to_priority: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationChanges {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub rank_shifts: Vec<RankShift>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextChanges {
    pub context_applied_from: bool,
    pub context_applied_to: bool,
    pub context_version_from: String,
    pub context_version_to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDiff {
    pub score_delta: ScoreDelta,
    pub recommendation_changes: RecommendationChanges,
    pub context_changes: ContextChanges,
}

/// Changes going from run `from` to run `to`.
pub fn diff_runs(from: &DecisionRecord, to: &DecisionRecord) -> RunDiff {
    let before: BTreeMap<&str, u32> = from
        .result
        .recommendations
        .iter()
        .map(|rec| (rec.id.as_str(), rec.priority))
        .collect();
    let after: BTreeMap<&str, u32> = to
        .result
        .recommendations
        .iter()
        .map(|rec| (rec.id.as_str(), rec.priority))
        .collect();

    let before_ids: BTreeSet<&str> = before.keys().copied().collect();
    let after_ids: BTreeSet<&str> = after.keys().copied().collect();

    let rank_shifts = before_ids
        .intersection(&after_ids)
        .filter_map(|id| {
            let from_priority = before[id];
            let to_priority = after[id];
            (from_priority != to_priority).then(|| RankShift {
                id: id.to_string(),
                from_priority,
                to_priority,
            })
        })
        .collect();

    RunDiff {
        score_delta: ScoreDelta {
            alignment_score_delta: round_to(
                to.result.alignment_score - from.result.alignment_score,
                4,
            ),
            risk_score_delta: round_to(to.result.risk_score - from.result.risk_score, 4),
            alignment_confidence_delta: round_to(
                to.result.alignment_confidence - from.result.alignment_confidence,
                4,
            ),
        },
        recommendation_changes: RecommendationChanges {
            added: after_ids
                .difference(&before_ids)
                .map(|id| id.to_string())
                .collect(),
            removed: before_ids
                .difference(&after_ids)
                .map(|id| id.to_string())
                .collect(),
            rank_shifts,
        },
        context_changes: ContextChanges {
            context_applied_from: from.result.context_applied,
            context_applied_to: to.result.context_applied,
            context_version_from: from.result.context_version.clone(),
            context_version_to: to.result.context_version.clone(),
        },
    }
}
