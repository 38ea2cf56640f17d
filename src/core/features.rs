//! Batch feature computation for one buffer generation.
//!
//! Features are computed once per generation, after the ring buffer wraps.
//! Nothing here is incremental: every field is derived from the full set of
//! samples (plus, for EMA, optionally the previous generation's output).

use crate::core::math::FactorialMode;
use crate::core::smoothing::{self, EmaRecurrence, EmaSeed};
use crate::core::{spectral, stats};
use serde::{Deserialize, Serialize};

/// Knobs that change how features are derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureParams {
    /// Factorial used inside the DCT's cosine approximation
    pub factorial: FactorialMode,
    /// EMA smoothing factor α, in (0, 1)
    pub smoothing_factor: f64,
    /// EMA feedback recurrence
    pub ema_recurrence: EmaRecurrence,
    /// EMA seed policy across generations
    pub ema_seed: EmaSeed,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            factorial: FactorialMode::Product,
            smoothing_factor: 0.6,
            ema_recurrence: EmaRecurrence::Standard,
            ema_seed: EmaSeed::Reset,
        }
    }
}

/// All features derived from one generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Normalized autocorrelation, lags `0..N`
    pub autocorrelation: Vec<f64>,
    /// DCT of the autocorrelation sequence
    pub dct: Vec<f64>,
    /// Smoothed samples
    pub ema: Vec<f64>,
}

/// Compute every feature for `samples`.
///
/// `prior_ema` is the previous generation's smoothed output, used only when
/// the seed policy carries state forward.
pub fn compute_features(
    samples: &[f64],
    params: &FeatureParams,
    prior_ema: Option<&[f64]>,
) -> FeatureSet {
    let mean = stats::mean(samples);
    let std_dev = stats::std_dev(samples, mean);

    let autocorrelation = spectral::autocorrelation(samples);
    let dct = spectral::dct(&autocorrelation, samples.len(), params.factorial);

    let ema = smoothing::ema(
        samples,
        prior_ema,
        params.smoothing_factor,
        params.ema_recurrence,
        params.ema_seed,
    );

    FeatureSet {
        mean,
        std_dev,
        autocorrelation,
        dct,
        ema,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_generation() {
        let features = compute_features(&[10.0; 4], &FeatureParams::default(), None);
        assert_eq!(features.mean, 10.0);
        assert_eq!(features.std_dev, 0.0);
        assert_eq!(features.autocorrelation.len(), 4);
        assert_eq!(features.dct.len(), 4);
        assert_eq!(features.ema, vec![10.0; 4]);
        // DC term is twice the sum of 1 + 0.75 + 0.5 + 0.25
        assert!((features.dct[0] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_generation_is_defined() {
        let features = compute_features(&[0.0; 8], &FeatureParams::default(), None);
        assert_eq!(features.autocorrelation, vec![0.0; 8]);
        assert_eq!(features.dct, vec![0.0; 8]);
        assert!(features.std_dev == 0.0);
    }

    #[test]
    fn test_compute_is_pure() {
        let samples = [12.0, 80.0, 33.0, 250.0];
        let params = FeatureParams::default();
        assert_eq!(
            compute_features(&samples, &params, None),
            compute_features(&samples, &params, None)
        );
    }

    #[test]
    fn test_prior_ema_only_used_when_carrying() {
        let samples = [0.0, 0.0];
        let prior = [40.0, 40.0];
        let reset = compute_features(&samples, &FeatureParams::default(), Some(&prior));
        assert_eq!(reset.ema[0], 0.0);

        let carry = FeatureParams {
            ema_seed: EmaSeed::Carry,
            smoothing_factor: 0.5,
            ..FeatureParams::default()
        };
        let carried = compute_features(&samples, &carry, Some(&prior));
        assert_eq!(carried.ema[0], 20.0);
    }
}
