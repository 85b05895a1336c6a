use crate::math::{mean, population_std_dev};

const MIN_ABS_MEAN: f64 = 1e-9;

/// Coefficient of variation: population stddev over |mean|.
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    if avg.abs() < MIN_ABS_MEAN {
        return None;
    }
    Some(population_std_dev(values)? / avg.abs())
}
