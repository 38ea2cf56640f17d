//! Replay of recorded raw ADC codes.
//!
//! Input is plain text with one integer code per line. Blank lines and lines
//! starting with `#` are skipped.

use crate::sensor::types::SensorError;
use crate::sensor::LightSensor;
use std::io::BufRead;

/// A finite sensor fed from a line-oriented reader.
pub struct ReplaySensor<R> {
    reader: R,
    line_number: usize,
    label: String,
}

impl<R: BufRead> ReplaySensor<R> {
    pub fn new(reader: R, label: impl Into<String>) -> Self {
        Self {
            reader,
            line_number: 0,
            label: label.into(),
        }
    }
}

impl<R: BufRead> LightSensor for ReplaySensor<R> {
    fn read_raw(&mut self) -> Result<i32, SensorError> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|e| SensorError::Unavailable(e.to_string()))?;
            if read == 0 {
                return Err(SensorError::Exhausted);
            }
            self.line_number += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return trimmed.parse::<i32>().map_err(|_| {
                SensorError::InvalidReading(format!(
                    "line {}: '{}' is not an integer code",
                    self.line_number, trimmed
                ))
            });
        }
    }

    fn describe(&self) -> String {
        format!("replay ({})", self.label)
    }
}
