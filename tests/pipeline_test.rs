//! End-to-end behaviour of the sampling pipeline.

use lumen_sensor_agent::core::math::{self, FactorialMode};
use lumen_sensor_agent::core::smoothing::{self, EmaRecurrence, EmaSeed};
use lumen_sensor_agent::core::{spectral, stats, ActivityTier, Aggregation};
use lumen_sensor_agent::format::decimal;
use lumen_sensor_agent::sensor::{Pattern, ReplaySensor, SimulatedSensor};
use lumen_sensor_agent::sink::ConsoleSink;
use lumen_sensor_agent::{Agent, Config, Pipeline, Profile, TickOutcome};
use proptest::prelude::*;
use std::io::Cursor;

fn first_report(profile: Profile, samples: &[f64]) -> lumen_sensor_agent::FeatureReport {
    let mut pipeline = Pipeline::new(Config::for_profile(profile)).unwrap();
    samples
        .iter()
        .find_map(|&s| pipeline.ingest(s))
        .expect("samples fill one generation")
}

#[test]
fn constant_buffer_reports_single_low_aggregate() {
    let report = first_report(Profile::Baseline, &[10.0, 10.0, 10.0, 10.0]);
    assert_eq!(report.mean, 10.0);
    assert_eq!(report.std_dev, 0.0);
    assert_eq!(report.tier, ActivityTier::Low);
    let values = report.aggregation.values();
    assert_eq!(values.len(), 1);
    assert_eq!(decimal(values[0]), "10.000");
}

#[test]
fn very_large_samples_keep_an_accurate_std_dev() {
    let report = first_report(Profile::Baseline, &[0.0, 1e70, 0.0, 1e70]);
    assert!((report.std_dev / 5e69 - 1.0).abs() < 1e-9, "std_dev {}", report.std_dev);
    assert_eq!(report.tier, ActivityTier::High);
    assert!(!decimal(report.std_dev).starts_with("18446744073709551615"));
}

#[test]
fn all_zero_extended_buffer_uses_zero_fallback() {
    let report = first_report(Profile::Extended, &[0.0; 8]);
    assert_eq!(report.autocorrelation, vec![0.0; 8]);
    assert_eq!(report.dct, vec![0.0; 8]);
    assert_eq!(report.tier, ActivityTier::Low);
    assert_eq!(report.samples.len(), 8);
}

#[test]
fn extended_profile_uses_inverted_ema() {
    let report = first_report(Profile::Extended, &[10.0; 8]);
    // s1 = 0.6*10 + 0.4*(1 - 10)
    assert_eq!(report.ema[0], 10.0);
    assert!((report.ema[1] - 2.4).abs() < 1e-9);
    assert_eq!(report.ema.len(), 8);
}

#[test]
fn medium_tier_segments_cover_buffer() {
    let samples = [0.0, 0.0, 300.0, 300.0, 0.0, 0.0, 300.0, 300.0];
    let report = first_report(Profile::Extended, &samples);
    assert!((report.std_dev - 150.0).abs() < 1e-6);
    assert_eq!(report.tier, ActivityTier::Medium);
    assert_eq!(
        report.aggregation,
        Aggregation::Segments {
            size: 2,
            values: vec![0.0, 300.0, 0.0, 300.0],
        }
    );
}

#[test]
fn generations_are_counted_across_wraps() {
    let mut pipeline = Pipeline::new(Config::for_profile(Profile::Baseline)).unwrap();
    let reports: Vec<_> = (0..12).filter_map(|i| pipeline.ingest(i as f64)).collect();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[2].generation, 3);
    assert_eq!(reports[2].samples, vec![8.0, 9.0, 10.0, 11.0]);
    assert_eq!(pipeline.generation(), 3);
}

#[test]
fn simulated_step_signal_reaches_high_tier() {
    let config = Config::for_profile(Profile::Baseline);
    let pipeline = Pipeline::new(config).unwrap();
    let sensor = SimulatedSensor::new(Pattern::Step, 0)
        .with_levels(2048, 2000)
        .with_period(1);
    let mut agent = Agent::new(sensor, pipeline, ConsoleSink::new(Vec::new(), false));

    let report = loop {
        if let TickOutcome::Reported(report) = agent.tick().unwrap() {
            break report;
        }
    };
    assert_eq!(report.tier, ActivityTier::High);
    assert_eq!(report.aggregation.values().len(), 4);
}

#[test]
fn replay_through_agent_prints_report() {
    let pipeline = Pipeline::new(Config::for_profile(Profile::Baseline)).unwrap();
    let sensor = ReplaySensor::new(Cursor::new("1000\n1000\n1000\n1000\n"), "inline");
    let mut agent = Agent::new(sensor, pipeline, ConsoleSink::new(Vec::new(), false));
    while !matches!(agent.tick().unwrap(), TickOutcome::Exhausted) {}

    let text = String::from_utf8(agent.into_sink().into_inner()).unwrap();
    assert!(text.contains("Low Activity Detected"));
    assert!(text.contains("X = [2288.818]"));
}

proptest! {
    #[test]
    fn sqrt_squares_back(x in 0.0f64..1e6) {
        let root = math::sqrt(x);
        prop_assert!((root * root - x).abs() <= 2e-4 * x.max(1.0));
    }

    #[test]
    fn sqrt_squares_back_at_any_magnitude(mantissa in 1.0f64..10.0, exponent in -300i32..=300) {
        let x = mantissa * 10f64.powi(exponent);
        let root = math::sqrt(x);
        prop_assert!((root * root - x).abs() <= 2e-4 * x.max(1.0));
    }

    #[test]
    fn sqrt_of_non_positive_is_zero(x in -1e6f64..=0.0) {
        prop_assert_eq!(math::sqrt(x), 0.0);
    }

    #[test]
    fn spectral_outputs_preserve_length(samples in prop::collection::vec(-1e3f64..1e3, 1..16)) {
        let r = spectral::autocorrelation(&samples);
        prop_assert_eq!(r.len(), samples.len());
        prop_assert_eq!(spectral::dct(&r, r.len(), FactorialMode::Product).len(), samples.len());
        prop_assert_eq!(spectral::dct(&samples, samples.len(), FactorialMode::TriangularSum).len(), samples.len());
    }

    #[test]
    fn autocorrelation_lag_zero_is_one(samples in prop::collection::vec(1.0f64..1e3, 1..16)) {
        let r = spectral::autocorrelation(&samples);
        prop_assert!((r[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ema_preserves_length_and_seed(
        samples in prop::collection::vec(0.0f64..1e4, 1..16),
        alpha in 0.01f64..0.99,
    ) {
        for recurrence in [EmaRecurrence::Standard, EmaRecurrence::Inverted] {
            let out = smoothing::ema(&samples, None, alpha, recurrence, EmaSeed::Reset);
            prop_assert_eq!(out.len(), samples.len());
            prop_assert_eq!(out[0], samples[0]);
        }
    }

    #[test]
    fn statistics_are_pure(samples in prop::collection::vec(0.0f64..1e4, 1..16)) {
        let m = stats::mean(&samples);
        prop_assert_eq!(m, stats::mean(&samples));
        prop_assert_eq!(stats::std_dev(&samples, m), stats::std_dev(&samples, m));
    }
}
