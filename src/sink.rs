//! Output sinks for readings and generation reports.

use crate::core::{Aggregation, FeatureReport};
use crate::format::{decimal, decimal_list};
use crate::sensor::LightReading;
use std::io::{self, Write};

/// Destination for the agent's output.
pub trait ReportSink {
    /// Called for every ingested reading.
    fn reading(&mut self, reading: &LightReading) -> io::Result<()>;

    /// Called once per reduced generation.
    fn report(&mut self, report: &FeatureReport) -> io::Result<()>;
}

impl<K: ReportSink + ?Sized> ReportSink for Box<K> {
    fn reading(&mut self, reading: &LightReading) -> io::Result<()> {
        (**self).reading(reading)
    }

    fn report(&mut self, report: &FeatureReport) -> io::Result<()> {
        (**self).report(report)
    }
}

/// Plain-text console output, one labelled line per feature.
pub struct ConsoleSink<W> {
    out: W,
    echo_readings: bool,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, echo_readings: bool) -> Self {
        Self { out, echo_readings }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout(echo_readings: bool) -> Self {
        Self::new(io::stdout(), echo_readings)
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn reading(&mut self, reading: &LightReading) -> io::Result<()> {
        if self.echo_readings {
            writeln!(self.out, "Current Reading: {} lux", decimal(reading.lux))?;
        }
        Ok(())
    }

    fn report(&mut self, report: &FeatureReport) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out, "B = {}", decimal_list(&report.samples))?;
        writeln!(out, "StdDev = {}", decimal(report.std_dev))?;
        writeln!(out, "{} Activity Detected", report.tier)?;
        if let Aggregation::Segments { size, .. } = &report.aggregation {
            writeln!(out, "Aggregation = {size}-into-1")?;
        }
        writeln!(out, "X = {}", decimal_list(report.aggregation.values()))?;
        writeln!(
            out,
            "Autocorrelation Values: {}",
            decimal_list(&report.autocorrelation)
        )?;
        writeln!(out, "DCT Values: {}", decimal_list(&report.dct))?;
        writeln!(out, "Smoothing Factor = {}", decimal(report.smoothing_factor))?;
        writeln!(out, "EMA = {}", decimal_list(&report.ema))?;
        out.flush()
    }
}

/// One JSON object per report, newline separated.
pub struct JsonLinesSink<W> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl JsonLinesSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ReportSink for JsonLinesSink<W> {
    fn reading(&mut self, _reading: &LightReading) -> io::Result<()> {
        Ok(())
    }

    fn report(&mut self, report: &FeatureReport) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, report).map_err(io::Error::other)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
