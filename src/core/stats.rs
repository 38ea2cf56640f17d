//! Summary statistics over a sample buffer.

use crate::core::math;

/// Arithmetic mean. Returns 0 for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation around a precomputed `mean`.
///
/// Uses the crate's own [`math::sqrt`] rather than `f64::sqrt`.
pub fn std_dev(samples: &[f64], mean: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let variance = samples
        .iter()
        .map(|&v| (v - mean) * (v - mean))
        .sum::<f64>()
        / samples.len() as f64;
    math::sqrt(variance)
}
