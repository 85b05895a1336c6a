use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{
    decision::types::{Evaluation, Recommendation},
    math::{clamp01, mean, round_to},
};

pub const CONFIDENCE_VERSION: &str = "conf_v1";
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.2;

const DISPERSION_CEILING: f64 = 0.12;
const OUTPUT_PLACES: i32 = 4;

const NOTE_INCOMPLETE: &str = "Lower confidence due to incomplete signal coverage.";
const NOTE_VOLATILE: &str = "Lower confidence due to high volatility.";
const NOTE_SHORT_WINDOW: &str = "Lower confidence due to insufficient lookback window.";
const NOTE_SUPPORTED: &str = "Confidence supported by sufficient and stable inputs.";

/// Deviation flags from one prior run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub deviations: BTreeMap<String, bool>,
}

impl HistoryEntry {
    fn active(&self) -> BTreeSet<&str> {
        active_set(&self.deviations)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    pub data_completeness: f64,
    pub signal_stability: f64,
    pub threshold_distance: f64,
    pub historical_persistence: f64,
    pub window_sufficiency: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            data_completeness: 0.30,
            signal_stability: 0.20,
            threshold_distance: 0.20,
            historical_persistence: 0.20,
            window_sufficiency: 0.10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceComponents {
    pub data_completeness: f64,
    pub signal_stability: f64,
    pub threshold_distance: f64,
    pub historical_persistence: f64,
    pub window_sufficiency: f64,
}

impl ConfidenceComponents {
    fn weighted(&self, weights: &ConfidenceWeights) -> f64 {
        weights.data_completeness * self.data_completeness
            + weights.signal_stability * self.signal_stability
            + weights.threshold_distance * self.threshold_distance
            + weights.historical_persistence * self.historical_persistence
            + weights.window_sufficiency * self.window_sufficiency
    }

    fn rounded(&self) -> Self {
        Self {
            data_completeness: round_to(self.data_completeness, OUTPUT_PLACES),
            signal_stability: round_to(self.signal_stability, OUTPUT_PLACES),
            threshold_distance: round_to(self.threshold_distance, OUTPUT_PLACES),
            historical_persistence: round_to(self.historical_persistence, OUTPUT_PLACES),
            window_sufficiency: round_to(self.window_sufficiency, OUTPUT_PLACES),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingState {
    pub alpha: f64,
    pub previous_used: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub components: ConfidenceComponents,
    pub weights: ConfidenceWeights,
    pub smoothing: SmoothingState,
    pub confidence_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfidence {
    pub id: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceResult {
    pub alignment_confidence: f64,
    pub recommendation_confidence: Vec<RecommendationConfidence>,
    pub confidence_breakdown: ConfidenceBreakdown,
    pub confidence_notes: Vec<String>,
    pub confidence_version: String,
}

impl ConfidenceResult {
    pub fn for_recommendation(&self, id: &str) -> Option<f64> {
        self.recommendation_confidence
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.confidence)
    }
}

pub struct ConfidenceInputs<'a> {
    pub sufficiency: &'a BTreeMap<String, bool>,
    pub dispersion: Option<f64>,
    pub evaluation: &'a Evaluation,
    pub history: &'a [HistoryEntry],
    pub available_observations: u32,
    pub required_observations: u32,
    pub previous_confidence: Option<f64>,
    pub smoothing_alpha: f64,
    pub recommendations: &'a [Recommendation],
}

pub fn compute_confidence(inputs: &ConfidenceInputs<'_>) -> ConfidenceResult {
    let components = ConfidenceComponents {
        data_completeness: data_completeness(inputs.sufficiency),
        signal_stability: signal_stability(inputs.dispersion),
        threshold_distance: threshold_distance(inputs.evaluation),
        historical_persistence: historical_persistence(inputs.evaluation, inputs.history),
        window_sufficiency: window_sufficiency(
            inputs.available_observations,
            inputs.required_observations,
        ),
    };
    let weights = ConfidenceWeights::default();
    let raw = clamp01(components.weighted(&weights));

    let alpha = clamp01(inputs.smoothing_alpha);
    let alignment_confidence = match inputs.previous_confidence {
        Some(previous) => clamp01(alpha * clamp01(previous) + (1.0 - alpha) * raw),
        None => raw,
    };

    let recommendation_confidence = inputs
        .recommendations
        .iter()
        .map(|rec| RecommendationConfidence {
            id: rec.id.clone(),
            confidence: round_to(
                recommendation_confidence(alignment_confidence, rec),
                OUTPUT_PLACES,
            ),
        })
        .collect();

    ConfidenceResult {
        alignment_confidence: round_to(alignment_confidence, OUTPUT_PLACES),
        recommendation_confidence,
        confidence_breakdown: ConfidenceBreakdown {
            components: components.rounded(),
            weights,
            smoothing: SmoothingState {
                alpha,
                previous_used: inputs.previous_confidence.is_some(),
            },
            confidence_version: CONFIDENCE_VERSION.to_string(),
        },
        confidence_notes: confidence_notes(&components),
        confidence_version: CONFIDENCE_VERSION.to_string(),
    }
}

fn data_completeness(sufficiency: &BTreeMap<String, bool>) -> f64 {
    if sufficiency.is_empty() {
        return 0.0;
    }
    let present = sufficiency.values().filter(|ok| **ok).count();
    present as f64 / sufficiency.len() as f64
}

fn signal_stability(dispersion: Option<f64>) -> f64 {
    match dispersion {
        Some(value) => 1.0 - clamp01(value / DISPERSION_CEILING),
        None => 0.5,
    }
}

fn threshold_distance(evaluation: &Evaluation) -> f64 {
    if !evaluation.threshold_distances.is_empty() {
        let clamped: Vec<f64> = evaluation
            .threshold_distances
            .iter()
            .map(|value| clamp01(*value))
            .collect();
        return mean(&clamped).unwrap_or(0.5);
    }
    if evaluation.deviations.is_empty() {
        return 0.5;
    }
    let misses = evaluation.active_deviations().count();
    clamp01(1.0 - misses as f64 / evaluation.deviations.len() as f64)
}

fn historical_persistence(evaluation: &Evaluation, history: &[HistoryEntry]) -> f64 {
    if history.is_empty() {
        return 0.5;
    }
    let current = active_set(&evaluation.deviations);
    if current.is_empty() {
        return 0.7;
    }
    let matches = history
        .iter()
        .filter(|entry| entry.active() == current)
        .count();
    matches as f64 / history.len() as f64
}

fn window_sufficiency(available: u32, required: u32) -> f64 {
    if required == 0 {
        return 1.0;
    }
    clamp01(f64::from(available) / f64::from(required))
}

fn recommendation_confidence(alignment_confidence: f64, rec: &Recommendation) -> f64 {
    let has_reasons = !rec.reason_codes.is_empty();
    let coverage = rec.reason_codes.len().min(4) as f64 / 4.0;
    let specificity = if has_reasons { 0.8 } else { 0.4 };
    let unexplained_penalty = if has_reasons { 0.0 } else { 0.1 };

    clamp01(
        0.20 + 0.35 * alignment_confidence
            + 0.20 * coverage
            + 0.15 * specificity
            + 0.20 * clamp01(rec.confidence)
            - unexplained_penalty,
    )
}

fn confidence_notes(components: &ConfidenceComponents) -> Vec<String> {
    let mut notes = Vec::new();
    if components.data_completeness < 0.7 {
        notes.push(NOTE_INCOMPLETE.to_string());
    }
    if components.signal_stability < 0.5 {
        notes.push(NOTE_VOLATILE.to_string());
    }
    if components.window_sufficiency < 1.0 {
        notes.push(NOTE_SHORT_WINDOW.to_string());
    }
    if notes.is_empty() {
        notes.push(NOTE_SUPPORTED.to_string());
    }
    notes
}

fn active_set(deviations: &BTreeMap<String, bool>) -> BTreeSet<&str> {
    deviations
        .iter()
        .filter(|(_, active)| **active)
        .map(|(name, _)| name.as_str())
        .collect()
}
