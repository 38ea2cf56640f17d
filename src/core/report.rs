//! Per-generation feature reports.
//!
//! A report is the unit of output of the pipeline: the raw samples of one
//! generation, its statistics, activity tier, tier-specific aggregation and
//! spectral/smoothing features. Reports serialize to JSON for the JSON-lines
//! sink and render as text for the console sink.

use crate::config::Profile;
use crate::core::classifier::{ActivityTier, Aggregation};
use crate::core::features::FeatureSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of this producer, stamped on every report.
pub const PRODUCER_NAME: &str = "lumen-sensor-agent";

/// Everything emitted for one reduced generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureReport {
    /// Unique ID of this report
    pub report_id: Uuid,
    /// ID of the builder (one per agent run) that produced it
    pub instance_id: Uuid,
    /// Producer name and version
    pub producer: String,
    /// 1-based generation counter
    pub generation: u64,
    /// When the generation was reduced
    pub computed_at: DateTime<Utc>,
    /// Profile the pipeline was configured from
    pub profile: Profile,
    /// Buffer contents in slot order
    pub samples: Vec<f64>,
    pub mean: f64,
    pub std_dev: f64,
    pub tier: ActivityTier,
    pub aggregation: Aggregation,
    pub autocorrelation: Vec<f64>,
    pub dct: Vec<f64>,
    pub ema: Vec<f64>,
    /// EMA α used for `ema`
    pub smoothing_factor: f64,
}

/// Stamps reports with a stable instance ID.
pub struct ReportBuilder {
    instance_id: Uuid,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4(),
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Assemble a report from a generation's features and classification.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        &self,
        generation: u64,
        profile: Profile,
        samples: &[f64],
        features: FeatureSet,
        tier: ActivityTier,
        aggregation: Aggregation,
        smoothing_factor: f64,
    ) -> FeatureReport {
        FeatureReport {
            report_id: Uuid::new_v4(),
            instance_id: self.instance_id,
            producer: format!("{PRODUCER_NAME}/{}", crate::VERSION),
            generation,
            computed_at: Utc::now(),
            profile,
            samples: samples.to_vec(),
            mean: features.mean,
            std_dev: features.std_dev,
            tier,
            aggregation,
            autocorrelation: features.autocorrelation,
            dct: features.dct,
            ema: features.ema,
            smoothing_factor,
        }
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
