use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::{
    context::types::{
        CONTEXT_VERSION, ContextInput, ContextModulator, ContextResult, PRIORITY_SCORE_SCALE,
        neutral_scalars,
    },
    decision::types::Thresholds,
    math::round_to,
};

const MAX_VOLATILITY: &str = "max_volatility";
const MIN_RECOVERY: &str = "min_recovery";
const PHASE_PRIORITY_SCALE: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulatory,
    Luteal,
}

impl CyclePhase {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "menstrual" => Some(CyclePhase::Menstrual),
            "follicular" => Some(CyclePhase::Follicular),
            "ovulatory" => Some(CyclePhase::Ovulatory),
            "luteal" => Some(CyclePhase::Luteal),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "menstrual",
            CyclePhase::Follicular => "follicular",
            CyclePhase::Ovulatory => "ovulatory",
            CyclePhase::Luteal => "luteal",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CycleContext;

impl ContextModulator for CycleContext {
    fn context_type(&self) -> &'static str {
        "cycle"
    }

    fn apply(
        &self,
        goal_type: &str,
        base_thresholds: &Thresholds,
        score_inputs: &BTreeMap<String, f64>,
        input: &ContextInput,
    ) -> ContextResult {
        let Some(phase) = input.phase.as_deref().and_then(CyclePhase::parse) else {
            return ContextResult::pass_through(
                base_thresholds,
                BTreeMap::from([
                    ("context_type".to_string(), json!(self.context_type())),
                    ("phase".to_string(), Value::Null),
                ]),
            );
        };

        let mut modulation = Modulation::new(base_thresholds);
        match phase {
            CyclePhase::Luteal => {
                modulation.adjust(
                    MAX_VOLATILITY,
                    |prev| prev * 1.15,
                    (0.02, 0.5),
                    "Luteal phase: widened volatility tolerance.",
                );
                modulation.adjust(
                    MIN_RECOVERY,
                    |prev| prev - 0.03,
                    (0.35, 0.95),
                    "Luteal phase: slightly softened recovery expectation.",
                );
                modulation.scale_priority(PHASE_PRIORITY_SCALE);
            }
            CyclePhase::Menstrual => {
                modulation.adjust(
                    MIN_RECOVERY,
                    |prev| prev - 0.05,
                    (0.35, 0.95),
                    "Menstrual phase: softened recovery expectation.",
                );
                modulation.scale_priority(PHASE_PRIORITY_SCALE);
            }
            CyclePhase::Follicular | CyclePhase::Ovulatory => {}
        }

        let mut notes = modulation.notes;
        if notes.is_empty() {
            notes.push(format!("Cycle context applied for phase: {}.", phase.as_str()));
        }

        ContextResult {
            modulated_thresholds: modulation.thresholds,
            penalty_scalars: modulation.scalars,
            tolerance_adjustments: modulation.adjustments,
            context_applied: true,
            notes,
            context_version: CONTEXT_VERSION.to_string(),
            metadata: BTreeMap::from([
                ("context_type".to_string(), json!(self.context_type())),
                ("phase".to_string(), json!(phase.as_str())),
                ("goal_type".to_string(), json!(goal_type)),
                ("score_inputs".to_string(), json!(score_inputs)),
            ]),
        }
    }
}

struct Modulation {
    thresholds: Thresholds,
    scalars: BTreeMap<String, f64>,
    adjustments: BTreeMap<String, f64>,
    notes: Vec<String>,
}

impl Modulation {
    fn new(base: &Thresholds) -> Self {
        Self {
            thresholds: base.clone(),
            scalars: neutral_scalars(),
            adjustments: BTreeMap::new(),
            notes: Vec::new(),
        }
    }

    /// Only thresholds the goal actually uses are touched.
    fn adjust(&mut self, key: &str, shift: impl Fn(f64) -> f64, bounds: (f64, f64), note: &str) {
        let Some(previous) = self.thresholds.get(key).copied() else {
            return;
        };
        let next = shift(previous).clamp(bounds.0, bounds.1);
        self.thresholds.insert(key.to_string(), next);
        self.adjustments
            .insert(format!("{key}_delta"), round_to(next - previous, 4));
        self.notes.push(note.to_string());
    }

    fn scale_priority(&mut self, scale: f64) {
        self.scalars.insert(PRIORITY_SCORE_SCALE.to_string(), scale);
    }
}
