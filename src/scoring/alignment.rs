const PERFECT_ALIGNMENT: f64 = 100.0;

/// `100 - sum(penalties)`, bounded to `[0, 100]`.
pub fn compute_alignment_score(penalties: &[f64]) -> f64 {
    let total: f64 = penalties.iter().sum();
    (PERFECT_ALIGNMENT - total).clamp(0.0, PERFECT_ALIGNMENT)
}

pub fn risk_score(alignment_score: f64) -> f64 {
    (PERFECT_ALIGNMENT - alignment_score).clamp(0.0, PERFECT_ALIGNMENT)
}
