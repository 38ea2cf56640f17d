//! One tick of the sensing loop.
//!
//! Each tick reads the sensor once, converts the raw code to lux, feeds the
//! pipeline and forwards anything produced to the sink. A failed read skips
//! the tick; only an exhausted source ends the run.

use crate::core::FeatureReport;
use crate::pipeline::Pipeline;
use crate::sensor::{Calibration, LightReading, LightSensor, SensorError};
use crate::session::SessionLog;
use crate::sink::ReportSink;
use std::io;

/// What happened on a tick.
#[derive(Debug)]
pub enum TickOutcome {
    /// A sample was buffered without completing a generation.
    Buffered,
    /// A sample completed a generation.
    Reported(Box<FeatureReport>),
    /// The sensor failed; the tick was skipped.
    Skipped(SensorError),
    /// The sensor has no more samples.
    Exhausted,
}

/// Sensor, pipeline and sink wired together.
pub struct Agent<S, K> {
    sensor: S,
    sink: K,
    calibration: Calibration,
    pipeline: Pipeline,
    log: SessionLog,
}

impl<S: LightSensor, K: ReportSink> Agent<S, K> {
    pub fn new(sensor: S, pipeline: Pipeline, sink: K) -> Self {
        Self {
            sensor,
            sink,
            calibration: pipeline.config().calibration,
            pipeline,
            log: SessionLog::new(),
        }
    }

    /// Handle one timer event.
    ///
    /// Sink write failures are returned; sensor failures never are.
    pub fn tick(&mut self) -> io::Result<TickOutcome> {
        let raw = match self.sensor.read_raw() {
            Ok(raw) => raw,
            Err(SensorError::Exhausted) => return Ok(TickOutcome::Exhausted),
            Err(e) => {
                tracing::warn!(error = %e, sensor = %self.sensor.describe(), "skipping tick");
                self.log.record_fault();
                return Ok(TickOutcome::Skipped(e));
            }
        };

        let reading = LightReading::new(raw, &self.calibration);
        self.log.record_sample();
        self.sink.reading(&reading)?;

        match self.pipeline.ingest(reading.lux) {
            Some(report) => {
                self.log.record_generation(report.tier);
                self.sink.report(&report)?;
                Ok(TickOutcome::Reported(Box::new(report)))
            }
            None => Ok(TickOutcome::Buffered),
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn into_sink(self) -> K {
        self.sink
    }
}
