//! In-memory statistics for one agent run.
//!
//! Nothing here is persisted; the summary is printed when the agent stops.

use crate::core::ActivityTier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters for the current run.
#[derive(Debug)]
pub struct SessionLog {
    samples_ingested: u64,
    sensor_faults: u64,
    generations_reduced: u64,
    low_reports: u64,
    medium_reports: u64,
    high_reports: u64,
    session_start: DateTime<Utc>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self {
            samples_ingested: 0,
            sensor_faults: 0,
            generations_reduced: 0,
            low_reports: 0,
            medium_reports: 0,
            high_reports: 0,
            session_start: Utc::now(),
        }
    }

    pub fn record_sample(&mut self) {
        self.samples_ingested += 1;
    }

    pub fn record_fault(&mut self) {
        self.sensor_faults += 1;
    }

    /// Record a reduced generation and its tier.
    pub fn record_generation(&mut self, tier: ActivityTier) {
        self.generations_reduced += 1;
        match tier {
            ActivityTier::Low => self.low_reports += 1,
            ActivityTier::Medium => self.medium_reports += 1,
            ActivityTier::High => self.high_reports += 1,
        }
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            samples_ingested: self.samples_ingested,
            sensor_faults: self.sensor_faults,
            generations_reduced: self.generations_reduced,
            low_reports: self.low_reports,
            medium_reports: self.medium_reports,
            high_reports: self.high_reports,
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Session Statistics:\n\
             - Samples ingested: {}\n\
             - Sensor faults: {}\n\
             - Generations reduced: {}\n\
             - Activity: {} low, {} medium, {} high\n\
             - Session duration: {} seconds",
            stats.samples_ingested,
            stats.sensor_faults,
            stats.generations_reduced,
            stats.low_reports,
            stats.medium_reports,
            stats.high_reports,
            stats.session_duration_secs
        )
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of session statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub samples_ingested: u64,
    pub sensor_faults: u64,
    pub generations_reduced: u64,
    pub low_reports: u64,
    pub medium_reports: u64,
    pub high_reports: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}
