//! Run statistics for the Lumen Sensor Agent.

pub mod log;

pub use log::{SessionLog, SessionStats};
