//! Light sensor sources for the Lumen Sensor Agent.
//!
//! The agent only needs one operation from a sensor: read the current raw ADC
//! code. Conversion to lux is done by [`Calibration`], outside the sensor.

pub mod replay;
pub mod simulated;
pub mod types;

// Re-export commonly used types
pub use replay::ReplaySensor;
pub use simulated::{Pattern, SimulatedSensor};
pub use types::{Calibration, LightReading, SensorError};

/// A source of raw light-intensity codes, read once per tick.
pub trait LightSensor {
    /// Read the current raw ADC code.
    fn read_raw(&mut self) -> Result<i32, SensorError>;

    /// Human-readable name for status output.
    fn describe(&self) -> String;
}

impl<S: LightSensor + ?Sized> LightSensor for Box<S> {
    fn read_raw(&mut self) -> Result<i32, SensorError> {
        (**self).read_raw()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
