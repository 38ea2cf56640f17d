//! Sample ingestion and per-generation reduction.
//!
//! The pipeline is a two-state machine driven by the ring buffer cursor:
//!
//! ```text
//!   ┌──────────┐  cursor wraps to 0  ┌──────────┐
//!   │ Filling  │────────────────────▶│ Reducing │
//!   │ (0..N-1) │◀────────────────────│ features │
//!   └──────────┘   report emitted    └──────────┘
//! ```
//!
//! Reduction is a one-shot batch over the full buffer: statistics, spectral
//! features and smoothing, then classification into an activity tier. It runs
//! to completion inside [`Pipeline::ingest`], so between calls the pipeline is
//! always filling and [`Pipeline::pending`] is the cursor.

use crate::config::{Config, ConfigError};
use crate::core::{
    aggregate, classify, compute_features, FeatureParams, FeatureReport, PushOutcome,
    ReportBuilder, SampleBuffer,
};

/// Owns the sample buffer and the smoothing state carried between generations.
pub struct Pipeline {
    config: Config,
    params: FeatureParams,
    buffer: SampleBuffer,
    /// Last generation's EMA output, zero until the first reduction
    ema_state: Vec<f64>,
    generation: u64,
    builder: ReportBuilder,
}

impl Pipeline {
    /// Build a pipeline from a configuration, rejecting invalid settings.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Self::with_builder(config, ReportBuilder::new())
    }

    /// Build a pipeline that stamps reports with the given builder.
    pub fn with_builder(config: Config, builder: ReportBuilder) -> Result<Self, ConfigError> {
        config.validate()?;
        let capacity = config.buffer_capacity;
        Ok(Self {
            params: config.feature_params(),
            buffer: SampleBuffer::new(capacity),
            ema_state: vec![0.0; capacity],
            generation: 0,
            config,
            builder,
        })
    }

    /// Append one sample; returns a report when it completes a generation.
    pub fn ingest(&mut self, sample: f64) -> Option<FeatureReport> {
        match self.buffer.push(sample) {
            PushOutcome::Filling { cursor } => {
                tracing::debug!(sample, cursor, "sample buffered");
                None
            }
            PushOutcome::Wrapped => {
                tracing::debug!(sample, "buffer full");
                Some(self.reduce())
            }
        }
    }

    fn reduce(&mut self) -> FeatureReport {
        self.generation += 1;
        let samples = self.buffer.as_slice();

        let prior = (self.generation > 1).then_some(self.ema_state.as_slice());
        let features = compute_features(samples, &self.params, prior);

        let tier = classify(features.std_dev, &self.config.thresholds);
        let aggregation = aggregate(tier, samples, features.mean, self.config.medium_segment);

        tracing::info!(
            generation = self.generation,
            mean = features.mean,
            std_dev = features.std_dev,
            tier = %tier,
            "generation reduced"
        );

        self.ema_state.clone_from(&features.ema);

        self.builder.build(
            self.generation,
            self.config.profile,
            samples,
            features,
            tier,
            aggregation,
            self.config.smoothing_factor,
        )
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of completed generations.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Samples written toward the next generation.
    pub fn pending(&self) -> usize {
        self.buffer.pending()
    }

    pub fn buffer(&self) -> &[f64] {
        self.buffer.as_slice()
    }

    /// Smoothing state carried into the next generation.
    pub fn ema_state(&self) -> &[f64] {
        &self.ema_state
    }
}
