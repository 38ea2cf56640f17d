//! Exponential moving average over one buffer generation.

use serde::{Deserialize, Serialize};

/// Recurrence applied to the previous smoothed value.
///
/// `Standard` is `s[i] = α·x[i] + (1-α)·s[i-1]`. `Inverted` reproduces the
/// reference build that feeds `1 - s[i-1]` back into the recursion instead.
/// Neither is silently preferred; the profile picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmaRecurrence {
    #[default]
    Standard,
    Inverted,
}

impl EmaRecurrence {
    fn feedback(self, previous: f64) -> f64 {
        match self {
            EmaRecurrence::Standard => previous,
            EmaRecurrence::Inverted => 1.0 - previous,
        }
    }
}

/// Where the first smoothed value of a generation comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmaSeed {
    /// `s[0] = x[0]`, discarding the previous generation.
    #[default]
    Reset,
    /// `s[0]` continues from the previous generation's last smoothed value
    /// through the same recurrence. Falls back to `Reset` when there is no
    /// previous generation.
    Carry,
}

/// Smooth `samples` into a sequence of the same length.
///
/// `prior_state` is the previous generation's output and is only consulted
/// under [`EmaSeed::Carry`].
pub fn ema(
    samples: &[f64],
    prior_state: Option<&[f64]>,
    alpha: f64,
    recurrence: EmaRecurrence,
    seed: EmaSeed,
) -> Vec<f64> {
    let mut state = Vec::with_capacity(samples.len());
    let Some((&first, rest)) = samples.split_first() else {
        return state;
    };

    let carried = match seed {
        EmaSeed::Reset => None,
        EmaSeed::Carry => prior_state.and_then(|prior| prior.last().copied()),
    };
    let seed_value = match carried {
        Some(previous) => alpha * first + (1.0 - alpha) * recurrence.feedback(previous),
        None => first,
    };
    state.push(seed_value);

    let mut previous = seed_value;
    for &x in rest {
        let next = alpha * x + (1.0 - alpha) * recurrence.feedback(previous);
        state.push(next);
        previous = next;
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_recurrence() {
        let out = ema(
            &[10.0, 20.0, 20.0],
            None,
            0.5,
            EmaRecurrence::Standard,
            EmaSeed::Reset,
        );
        assert_eq!(out, vec![10.0, 15.0, 17.5]);
    }

    #[test]
    fn test_inverted_recurrence() {
        // s1 = 0.6*20 + 0.4*(1-10) = 8.4
        // s2 = 0.6*20 + 0.4*(1-8.4) = 9.04
        let out = ema(
            &[10.0, 20.0, 20.0],
            None,
            0.6,
            EmaRecurrence::Inverted,
            EmaSeed::Reset,
        );
        assert_eq!(out[0], 10.0);
        assert!((out[1] - 8.4).abs() < 1e-12);
        assert!((out[2] - 9.04).abs() < 1e-12);
    }

    #[test]
    fn test_constant_input_is_fixed_point_of_standard() {
        let out = ema(&[7.0; 8], None, 0.6, EmaRecurrence::Standard, EmaSeed::Reset);
        assert!(out.iter().all(|&v| (v - 7.0).abs() < 1e-12));
    }

    #[test]
    fn test_reset_ignores_prior_state() {
        let prior = [100.0, 200.0];
        let out = ema(
            &[1.0, 2.0],
            Some(&prior),
            0.5,
            EmaRecurrence::Standard,
            EmaSeed::Reset,
        );
        assert_eq!(out[0], 1.0);
    }

    #[test]
    fn test_carry_continues_from_prior_tail() {
        let prior = [100.0, 200.0];
        let out = ema(
            &[0.0, 0.0],
            Some(&prior),
            0.5,
            EmaRecurrence::Standard,
            EmaSeed::Carry,
        );
        assert_eq!(out, vec![100.0, 50.0]);
    }

    #[test]
    fn test_carry_without_prior_resets() {
        let out = ema(&[4.0, 4.0], None, 0.5, EmaRecurrence::Standard, EmaSeed::Carry);
        assert_eq!(out[0], 4.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(ema(&[], None, 0.5, EmaRecurrence::Standard, EmaSeed::Reset).is_empty());
    }
}
