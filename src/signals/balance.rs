use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::math::clamp01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Push,
    Pull,
    Lower,
    Core,
}

impl MuscleGroup {
    /// Maps a free-form session label onto a muscle group, if recognized.
    pub fn classify(session_type: &str) -> Option<Self> {
        match session_type.trim().to_lowercase().as_str() {
            "upper" | "chest" | "shoulders" | "triceps" | "push" => Some(MuscleGroup::Push),
            "back" | "biceps" | "pull" => Some(MuscleGroup::Pull),
            "legs" | "lower" | "lower_body" | "full_body" => Some(MuscleGroup::Lower),
            "core" | "abs" => Some(MuscleGroup::Core),
            _ => None,
        }
    }
}

pub fn default_target_distribution() -> BTreeMap<MuscleGroup, f64> {
    [
        (MuscleGroup::Push, 0.25),
        (MuscleGroup::Pull, 0.25),
        (MuscleGroup::Lower, 0.25),
        (MuscleGroup::Core, 0.25),
    ]
    .into_iter()
    .collect()
}

/// `1 - TVD/2` between observed group shares and `target`.
pub fn muscle_balance_index<'a>(
    session_types: impl IntoIterator<Item = &'a str>,
    target: &BTreeMap<MuscleGroup, f64>,
) -> Option<f64> {
    let mut counts: BTreeMap<MuscleGroup, usize> = BTreeMap::new();
    for session_type in session_types {
        if let Some(group) = MuscleGroup::classify(session_type) {
            *counts.entry(group).or_default() += 1;
        }
    }

    let total: usize = counts.values().sum();
    if total == 0 {
        return None;
    }

    let distance: f64 = target
        .iter()
        .map(|(group, share)| {
            let actual = counts.get(group).copied().unwrap_or_default() as f64 / total as f64;
            (actual - share).abs()
        })
        .sum();

    Some(clamp01(1.0 - distance / 2.0))
}
