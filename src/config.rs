//! Configuration for the Lumen Sensor Agent.

use crate::core::{EmaRecurrence, EmaSeed, FactorialMode, FeatureParams, Thresholds};
use crate::sensor::Calibration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Named reference build of the agent.
///
/// The two builds share the pipeline but disagree on buffer size, sensor
/// gain, factorial accumulation and the EMA recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// 4-sample buffer, true factorial, standard EMA
    #[default]
    Baseline,
    /// 8-sample buffer, triangular-sum factorial, inverted EMA
    Extended,
}

impl Profile {
    pub const ALL: [Profile; 2] = [Profile::Baseline, Profile::Extended];

    pub fn name(&self) -> &'static str {
        match self {
            Profile::Baseline => "baseline",
            Profile::Extended => "extended",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Profile::Baseline => "4 samples, segment 2, product factorial, standard EMA",
            Profile::Extended => "8 samples, segment 2, triangular-sum factorial, inverted EMA",
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baseline" => Ok(Profile::Baseline),
            "extended" => Ok(Profile::Extended),
            other => Err(ConfigError::Invalid(format!(
                "unknown profile '{other}' (expected baseline or extended)"
            ))),
        }
    }
}

/// Main configuration for the sensor agent.
///
/// When deserialized, fields absent from the input are taken from the preset
/// of the `profile` named in it (`baseline` if that is absent too).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct Config {
    /// Reference build these settings were derived from
    pub profile: Profile,

    /// Number of samples per generation (N)
    pub buffer_capacity: usize,

    /// Period of the sampling timer
    #[serde(serialize_with = "duration_serde::serialize")]
    pub sample_interval: Duration,

    /// Activity tier band edges on the standard deviation
    pub thresholds: Thresholds,

    /// Segment size for Medium-tier averaging; must divide `buffer_capacity`
    pub medium_segment: usize,

    /// EMA smoothing factor α
    pub smoothing_factor: f64,

    /// Factorial accumulation used by the DCT cosine
    pub factorial: FactorialMode,

    /// EMA feedback recurrence
    pub ema_recurrence: EmaRecurrence,

    /// EMA seed policy across generations
    pub ema_seed: EmaSeed,

    /// Raw ADC code to lux conversion
    pub calibration: Calibration,

    /// Print every converted reading as it is ingested
    pub echo_readings: bool,
}

/// Config as written on disk: every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    profile: Option<Profile>,
    buffer_capacity: Option<usize>,
    /// Milliseconds
    sample_interval: Option<u64>,
    thresholds: Option<Thresholds>,
    medium_segment: Option<usize>,
    smoothing_factor: Option<f64>,
    factorial: Option<FactorialMode>,
    ema_recurrence: Option<EmaRecurrence>,
    ema_seed: Option<EmaSeed>,
    calibration: Option<Calibration>,
    echo_readings: Option<bool>,
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        let preset = Config::for_profile(file.profile.unwrap_or_default());
        Self {
            profile: preset.profile,
            buffer_capacity: file.buffer_capacity.unwrap_or(preset.buffer_capacity),
            sample_interval: file
                .sample_interval
                .map(Duration::from_millis)
                .unwrap_or(preset.sample_interval),
            thresholds: file.thresholds.unwrap_or(preset.thresholds),
            medium_segment: file.medium_segment.unwrap_or(preset.medium_segment),
            smoothing_factor: file.smoothing_factor.unwrap_or(preset.smoothing_factor),
            factorial: file.factorial.unwrap_or(preset.factorial),
            ema_recurrence: file.ema_recurrence.unwrap_or(preset.ema_recurrence),
            ema_seed: file.ema_seed.unwrap_or(preset.ema_seed),
            calibration: file.calibration.unwrap_or(preset.calibration),
            echo_readings: file.echo_readings.unwrap_or(preset.echo_readings),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

impl Config {
    /// Settings of a named reference build.
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Baseline => Self {
                profile,
                buffer_capacity: 4,
                sample_interval: Duration::from_millis(500),
                thresholds: Thresholds::default(),
                medium_segment: 2,
                smoothing_factor: 0.6,
                factorial: FactorialMode::Product,
                ema_recurrence: EmaRecurrence::Standard,
                ema_seed: EmaSeed::Reset,
                calibration: Calibration::with_gain(0.625),
                echo_readings: true,
            },
            Profile::Extended => Self {
                profile,
                buffer_capacity: 8,
                sample_interval: Duration::from_millis(500),
                thresholds: Thresholds::default(),
                medium_segment: 2,
                smoothing_factor: 0.6,
                factorial: FactorialMode::TriangularSum,
                ema_recurrence: EmaRecurrence::Inverted,
                ema_seed: EmaSeed::Reset,
                calibration: Calibration::with_gain(0.0625),
                echo_readings: false,
            },
        }
    }

    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit JSON file.
    ///
    /// Missing fields take the named profile's preset. The result is validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lumen-sensor-agent")
            .join("config.json")
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_capacity == 0 {
            return Err(ConfigError::Invalid(
                "buffer_capacity must be at least 1".to_string(),
            ));
        }
        if self.medium_segment == 0 || self.buffer_capacity % self.medium_segment != 0 {
            return Err(ConfigError::Invalid(format!(
                "medium_segment {} does not evenly divide buffer_capacity {}",
                self.medium_segment, self.buffer_capacity
            )));
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "smoothing_factor {} must lie strictly between 0 and 1",
                self.smoothing_factor
            )));
        }
        let Thresholds { low, high } = self.thresholds;
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(ConfigError::Invalid(format!(
                "thresholds must be finite with low < high (got {low} / {high})"
            )));
        }
        if self.sample_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "sample_interval must be non-zero".to_string(),
            ));
        }
        self.calibration.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }

    /// Feature computation parameters derived from this config.
    pub fn feature_params(&self) -> FeatureParams {
        FeatureParams {
            factorial: self.factorial,
            smoothing_factor: self.smoothing_factor,
            ema_recurrence: self.ema_recurrence,
            ema_seed: self.ema_seed,
        }
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::Invalid(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Serde support for Duration, in milliseconds.
mod duration_serde {
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }
}
