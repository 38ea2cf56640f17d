//! Synthetic light sensor for running the agent without hardware.
//!
//! Produces raw 12-bit ADC codes following a chosen waveform. Noise comes
//! from a seeded generator, so a given seed always replays the same stream.

use crate::sensor::types::SensorError;
use crate::sensor::LightSensor;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;

/// Largest code a 12-bit ADC can return.
pub const ADC_MAX: i32 = 4095;

/// Shape of the simulated signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Flat at the midpoint level
    Constant,
    /// Sinusoid around the midpoint
    Sine,
    /// Square wave between midpoint ± amplitude
    Step,
    /// Uniform noise around the midpoint
    Noise,
}

impl FromStr for Pattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "constant" => Ok(Pattern::Constant),
            "sine" => Ok(Pattern::Sine),
            "step" => Ok(Pattern::Step),
            "noise" => Ok(Pattern::Noise),
            other => Err(format!(
                "unknown pattern '{other}' (expected constant, sine, step or noise)"
            )),
        }
    }
}

/// A deterministic synthetic sensor.
pub struct SimulatedSensor {
    pattern: Pattern,
    level: i32,
    amplitude: i32,
    period: u64,
    tick: u64,
    rng: SmallRng,
}

impl SimulatedSensor {
    /// Create a sensor with a mid-scale level and a quarter-scale amplitude.
    pub fn new(pattern: Pattern, seed: u64) -> Self {
        Self {
            pattern,
            level: 2048,
            amplitude: 1024,
            period: 8,
            tick: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Override the midpoint and amplitude, in ADC codes.
    pub fn with_levels(mut self, level: i32, amplitude: i32) -> Self {
        self.level = level;
        self.amplitude = amplitude.abs();
        self
    }

    /// Override the waveform period, in ticks.
    pub fn with_period(mut self, period: u64) -> Self {
        self.period = period.max(1);
        self
    }

    fn next_code(&mut self) -> i32 {
        let t = self.tick;
        self.tick += 1;

        let code = match self.pattern {
            Pattern::Constant => self.level,
            Pattern::Sine => {
                let phase = std::f64::consts::TAU * (t % self.period) as f64 / self.period as f64;
                self.level + (self.amplitude as f64 * phase.sin()).round() as i32
            }
            Pattern::Step => {
                if (t / self.period) % 2 == 0 {
                    self.level - self.amplitude
                } else {
                    self.level + self.amplitude
                }
            }
            Pattern::Noise => {
                let offset = if self.amplitude == 0 {
                    0
                } else {
                    self.rng.random_range(-self.amplitude..=self.amplitude)
                };
                self.level + offset
            }
        };
        code.clamp(0, ADC_MAX)
    }
}

impl LightSensor for SimulatedSensor {
    fn read_raw(&mut self) -> Result<i32, SensorError> {
        Ok(self.next_code())
    }

    fn describe(&self) -> String {
        format!("simulated ({:?})", self.pattern)
    }
}
