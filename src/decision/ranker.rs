use crate::{decision::types::Recommendation, math::clamp01};

const IMPACT_WEIGHT: f64 = 0.40;
const URGENCY_WEIGHT: f64 = 0.20;
const CONFIDENCE_WEIGHT: f64 = 0.35;
const EFFORT_WEIGHT: f64 = 0.15;

pub fn ranking_score(recommendation: &Recommendation, urgency: f64) -> f64 {
    let category = recommendation.category;
    IMPACT_WEIGHT * category.impact()
        + URGENCY_WEIGHT * clamp01(urgency)
        + CONFIDENCE_WEIGHT * clamp01(recommendation.confidence)
        - EFFORT_WEIGHT * category.effort()
}

/// Orders candidates by score, highest first, and assigns priorities `1..=N`.
///
/// Equal scores fall back to id, then to input position, so the result does
/// not depend on how candidates were ordered coming in.
pub fn rank(recommendations: &[Recommendation], urgency: f64) -> Vec<Recommendation> {
    let mut scored: Vec<(f64, usize, &Recommendation)> = recommendations
        .iter()
        .enumerate()
        .map(|(index, rec)| (ranking_score(rec, urgency), index, rec))
        .collect();
    scored.sort_by(|(lhs_score, lhs_index, lhs), (rhs_score, rhs_index, rhs)| {
        rhs_score
            .total_cmp(lhs_score)
            .then_with(|| lhs.id.cmp(&rhs.id))
            .then_with(|| lhs_index.cmp(rhs_index))
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(position, (_, _, rec))| Recommendation {
            priority: u32::try_from(position + 1).unwrap_or(u32::MAX),
            ..rec.clone()
        })
        .collect()
}
