//! Sensor reading types and the raw-to-lux conversion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Affine conversion from a raw ADC code to illuminance.
///
/// The photodiode drives a load resistor; the ADC measures the voltage across
/// it. `lux = gain · 1e6 · I · 1000` with `I = (V_ref · raw / full_scale) / R`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// ADC reference voltage in volts
    pub reference_voltage: f64,
    /// ADC full-scale code count
    pub adc_full_scale: f64,
    /// Load resistance in ohms
    pub load_resistance_ohms: f64,
    /// Sensor-specific gain (lux per microamp, before the ×1000 scale)
    pub lux_gain: f64,
}

impl Calibration {
    /// Standard front end (1.5 V reference, 12-bit ADC, 100 kΩ) with the given gain.
    pub fn with_gain(lux_gain: f64) -> Self {
        Self {
            reference_voltage: 1.5,
            adc_full_scale: 4096.0,
            load_resistance_ohms: 100_000.0,
            lux_gain,
        }
    }

    /// Convert a raw ADC code to lux.
    pub fn to_lux(&self, raw: i32) -> f64 {
        let volts = self.reference_voltage * raw as f64 / self.adc_full_scale;
        let amps = volts / self.load_resistance_ohms;
        self.lux_gain * 1e6 * amps * 1000.0
    }

    /// Check that the divisors are usable.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.adc_full_scale > 0.0) || !(self.load_resistance_ohms > 0.0) {
            return Err(format!(
                "calibration divisors must be positive (adc_full_scale {}, load_resistance_ohms {})",
                self.adc_full_scale, self.load_resistance_ohms
            ));
        }
        if !self.reference_voltage.is_finite() || !self.lux_gain.is_finite() {
            return Err("calibration constants must be finite".to_string());
        }
        Ok(())
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::with_gain(0.625)
    }
}

/// One converted sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightReading {
    /// When the reading was taken
    pub timestamp: DateTime<Utc>,
    /// Raw ADC code
    pub raw: i32,
    /// Converted illuminance
    pub lux: f64,
}

impl LightReading {
    pub fn new(raw: i32, calibration: &Calibration) -> Self {
        Self {
            timestamp: Utc::now(),
            raw,
            lux: calibration.to_lux(raw),
        }
    }
}

/// Errors a light sensor can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    /// The device could not be read this tick.
    Unavailable(String),
    /// A value was read but is not a valid ADC code.
    InvalidReading(String),
    /// A finite source has no more samples.
    Exhausted,
}

impl std::fmt::Display for SensorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorError::Unavailable(e) => write!(f, "Sensor unavailable: {e}"),
            SensorError::InvalidReading(e) => write!(f, "Invalid reading: {e}"),
            SensorError::Exhausted => write!(f, "Sensor source exhausted"),
        }
    }
}

impl std::error::Error for SensorError {}
