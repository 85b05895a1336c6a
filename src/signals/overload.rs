use crate::{
    math::{clamp01, mean, population_std_dev},
    signals::trend::linear_regression_slope,
};

const MIN_ABS: f64 = 1e-9;
const PCT_CHANGE_FLOOR: f64 = -0.10;
const PCT_CHANGE_SPAN: f64 = 0.20;
const SLOPE_REFERENCE_RATIO: f64 = 0.02;

/// Blend of session-over-session improvement, head-to-tail change and volume
/// consistency, nudged by the regression slope.
pub fn progressive_overload_score(volumes: &[f64]) -> Option<f64> {
    if volumes.len() < 2 {
        return None;
    }
    let base = base_score(volumes)?;

    let avg = mean(volumes)?;
    let slope_boost = match linear_regression_slope(volumes) {
        Some(slope) if avg.abs() >= MIN_ABS => {
            clamp01(slope / (avg.abs() * SLOPE_REFERENCE_RATIO))
        }
        _ => 0.0,
    };

    Some(clamp01(0.85 * base + 0.15 * slope_boost))
}

fn base_score(volumes: &[f64]) -> Option<f64> {
    let transitions = volumes.len() - 1;
    let improved = volumes
        .windows(2)
        .filter(|pair| pair[1] > pair[0])
        .count();
    let improved_ratio = improved as f64 / transitions as f64;

    let first = volumes[0];
    let last = volumes[transitions];
    let trend_norm = if first.abs() < MIN_ABS {
        0.5
    } else {
        let pct_change = (last - first) / first.abs();
        clamp01((pct_change - PCT_CHANGE_FLOOR) / PCT_CHANGE_SPAN)
    };

    let avg = mean(volumes)?;
    let consistency = if avg.abs() < MIN_ABS {
        0.0
    } else {
        clamp01(1.0 - population_std_dev(volumes)? / avg.abs())
    };

    Some(clamp01(
        0.5 * improved_ratio + 0.3 * trend_norm + 0.2 * consistency,
    ))
}
