pub mod alignment;
pub mod breakdown;
pub mod confidence;

pub use alignment::{compute_alignment_score, risk_score};
pub use breakdown::{ScoreBreakdown, build_breakdown};
pub use confidence::{
    CONFIDENCE_VERSION, ConfidenceBreakdown, ConfidenceInputs, ConfidenceResult, HistoryEntry,
    RecommendationConfidence, compute_confidence,
};
