//! Lumen Sensor Agent - periodic light-intensity analytics.
//!
//! This library samples a light sensor on a fixed tick, fills a small ring
//! buffer, and every time the buffer wraps derives statistical and
//! frequency-domain features used to classify activity and choose how much of
//! the generation to report.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Lumen Sensor Agent                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐        │
//! │  │   Sensor    │──▶│  Pipeline   │──▶│  Features   │        │
//! │  │ (raw → lux) │   │ (ring of N) │   │ stats/DCT/  │        │
//! │  └─────────────┘   └─────────────┘   │ EMA/autocorr│        │
//! │         │                            └─────────────┘        │
//! │         ▼                                    │              │
//! │  ┌─────────────┐                     ┌─────────────┐        │
//! │  │  Session    │                     │ Classifier  │──▶ Sink│
//! │  │    Log      │                     │ Low/Med/High│        │
//! │  └─────────────┘                     └─────────────┘        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use lumen_sensor_agent::{Config, Pipeline, Profile};
//! use lumen_sensor_agent::core::ActivityTier;
//!
//! let mut pipeline = Pipeline::new(Config::for_profile(Profile::Baseline)).unwrap();
//! let report = [10.0, 10.0, 10.0, 10.0]
//!     .iter()
//!     .find_map(|&lux| pipeline.ingest(lux))
//!     .unwrap();
//!
//! assert_eq!(report.tier, ActivityTier::Low);
//! assert_eq!(report.mean, 10.0);
//! ```

pub mod agent;
pub mod config;
pub mod core;
pub mod format;
pub mod pipeline;
pub mod sensor;
pub mod session;
pub mod sink;

// Re-export key types at crate root for convenience
pub use agent::{Agent, TickOutcome};
pub use config::{Config, ConfigError, Profile};
pub use crate::core::{compute_features, ActivityTier, FeatureReport, FeatureSet, ReportBuilder};
pub use pipeline::Pipeline;
pub use sensor::{Calibration, LightSensor, ReplaySensor, SensorError, SimulatedSensor};
pub use session::{SessionLog, SessionStats};
pub use sink::{ConsoleSink, JsonLinesSink, ReportSink};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
