//! Core signal analytics for the Lumen Sensor Agent.
//!
//! This module contains:
//! - Numeric primitives (square root, power, factorial, cosine)
//! - Statistics, spectral and smoothing features over a sample buffer
//! - The ring buffer and activity classifier
//! - Report building for export

pub mod buffer;
pub mod classifier;
pub mod features;
pub mod math;
pub mod report;
pub mod smoothing;
pub mod spectral;
pub mod stats;

// Re-export commonly used types
pub use buffer::{PushOutcome, SampleBuffer};
pub use classifier::{aggregate, classify, ActivityTier, Aggregation, Thresholds};
pub use features::{compute_features, FeatureParams, FeatureSet};
pub use math::FactorialMode;
pub use report::{FeatureReport, ReportBuilder, PRODUCER_NAME};
pub use smoothing::{EmaRecurrence, EmaSeed};
