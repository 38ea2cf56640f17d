//! Activity tier classification and tier-specific aggregation.
//!
//! The standard deviation of a generation picks one of three tiers, and the
//! tier decides how much of the generation is reported:
//!
//! | std_dev                | tier   | reported                     |
//! |------------------------|--------|------------------------------|
//! | `< low`                | Low    | the generation mean          |
//! | `low ..< high`         | Medium | one mean per fixed segment   |
//! | `>= high`              | High   | every raw sample             |

use crate::core::stats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default lower band edge.
pub const LOW_THRESHOLD: f64 = 50.0;

/// Default upper band edge.
pub const HIGH_THRESHOLD: f64 = 200.0;

/// Variability class of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityTier {
    Low,
    Medium,
    High,
}

impl ActivityTier {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityTier::Low => "Low",
            ActivityTier::Medium => "Medium",
            ActivityTier::High => "High",
        }
    }
}

impl fmt::Display for ActivityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Band edges on the standard deviation. Both comparisons are strict `<`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: LOW_THRESHOLD,
            high: HIGH_THRESHOLD,
        }
    }
}

/// Reported values for a generation, shaped by its tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Aggregation {
    /// Single aggregated mean.
    Single { value: f64 },
    /// One average per contiguous segment of `size` samples.
    Segments { size: usize, values: Vec<f64> },
    /// Every raw sample.
    Raw { values: Vec<f64> },
}

impl Aggregation {
    /// The reported numbers, regardless of shape.
    pub fn values(&self) -> &[f64] {
        match self {
            Aggregation::Single { value } => std::slice::from_ref(value),
            Aggregation::Segments { values, .. } => values,
            Aggregation::Raw { values } => values,
        }
    }
}

/// Map a standard deviation onto a tier.
pub fn classify(std_dev: f64, thresholds: &Thresholds) -> ActivityTier {
    if std_dev < thresholds.low {
        ActivityTier::Low
    } else if std_dev < thresholds.high {
        ActivityTier::Medium
    } else {
        ActivityTier::High
    }
}

/// Build the tier's aggregation from the generation's samples.
///
/// `segment` must evenly divide `samples.len()`; configuration validation
/// guarantees it. If it does not, a trailing short segment is averaged over
/// the samples it actually has.
pub fn aggregate(tier: ActivityTier, samples: &[f64], mean: f64, segment: usize) -> Aggregation {
    match tier {
        ActivityTier::Low => Aggregation::Single { value: mean },
        ActivityTier::Medium => {
            let size = segment.max(1);
            Aggregation::Segments {
                size,
                values: samples.chunks(size).map(stats::mean).collect(),
            }
        }
        ActivityTier::High => Aggregation::Raw {
            values: samples.to_vec(),
        },
    }
}
