//! Autocorrelation and discrete cosine transform.
//!
//! The DCT deliberately uses [`math::cosine`] instead of `f64::cos` so the
//! output matches what the sensor firmware produces, approximation error
//! included.

use crate::core::math::{self, FactorialMode};
use std::f64::consts::PI;

/// Normalized autocorrelation for lags `0..N`.
///
/// `r[i] = Σ_{j<N-i} x_j x_{j+i} / Σ_j x_j²`. An all-zero buffer has no
/// energy to normalize by and yields an all-zero sequence.
pub fn autocorrelation(samples: &[f64]) -> Vec<f64> {
    let n = samples.len();
    let energy: f64 = samples.iter().map(|&x| x * x).sum();
    if energy == 0.0 || !energy.is_finite() {
        return vec![0.0; n];
    }

    (0..n)
        .map(|lag| {
            let sum: f64 = samples[..n - lag]
                .iter()
                .zip(&samples[lag..])
                .map(|(a, b)| a * b)
                .sum();
            sum / energy
        })
        .collect()
}

/// DCT of the first `length` values of `input`.
///
/// `X[k] = Σ_n 2·input[n]·cos(π/(2·length) · k · (2n+1))`, where the cosine
/// comes from the Taylor approximation under `mode`. `length` is clamped to
/// `input.len()`.
pub fn dct(input: &[f64], length: usize, mode: FactorialMode) -> Vec<f64> {
    let length = length.min(input.len());
    if length == 0 {
        return Vec::new();
    }
    let factor = PI / (2.0 * length as f64);

    (0..length)
        .map(|k| {
            input[..length]
                .iter()
                .enumerate()
                .map(|(n, &x)| {
                    let angle = factor * k as f64 * (2 * n + 1) as f64;
                    2.0 * x * math::cosine(angle, mode)
                })
                .sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autocorrelation_known_values() {
        let r = autocorrelation(&[1.0, 2.0, 3.0]);
        assert_eq!(r.len(), 3);
        assert!((r[0] - 1.0).abs() < 1e-12);
        assert!((r[1] - 8.0 / 14.0).abs() < 1e-12);
        assert!((r[2] - 3.0 / 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_autocorrelation_constant_buffer_decays_linearly() {
        let r = autocorrelation(&[10.0; 4]);
        let expected = [1.0, 0.75, 0.5, 0.25];
        for (got, want) in r.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_autocorrelation_zero_energy_fallback() {
        assert_eq!(autocorrelation(&[0.0; 8]), vec![0.0; 8]);
    }

    #[test]
    fn test_dct_dc_component() {
        let x = dct(&[1.0, 1.0, 1.0, 1.0], 4, FactorialMode::Product);
        assert_eq!(x.len(), 4);
        assert!((x[0] - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_dct_constant_input_has_no_first_harmonic() {
        let x = dct(&[3.0, 3.0], 2, FactorialMode::Product);
        assert!((x[0] - 12.0).abs() < 1e-12);
        assert!(x[1].abs() < 1e-5, "X[1] = {}", x[1]);
    }

    #[test]
    fn test_dct_tracks_reference_for_small_angles() {
        let input = [0.5, -1.0];
        let x = dct(&input, 2, FactorialMode::Product);
        let factor = PI / 4.0;
        let reference: f64 = input
            .iter()
            .enumerate()
            .map(|(n, v)| 2.0 * v * (factor * (2 * n + 1) as f64).cos())
            .sum();
        assert!((x[1] - reference).abs() < 1e-5);
    }

    #[test]
    fn test_dct_length_clamped_to_input() {
        assert_eq!(dct(&[1.0, 2.0], 5, FactorialMode::Product).len(), 2);
        assert!(dct(&[], 4, FactorialMode::Product).is_empty());
    }

    #[test]
    fn test_dct_factorial_mode_changes_output() {
        let input = [1.0, 0.75, 0.5, 0.25];
        let product = dct(&input, 4, FactorialMode::Product);
        let triangular = dct(&input, 4, FactorialMode::TriangularSum);
        assert_eq!(product[0], triangular[0]);
        assert!((product[1] - triangular[1]).abs() > 1e-3);
    }
}
