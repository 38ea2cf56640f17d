//! Lumen Sensor Agent CLI
//!
//! Periodic light-intensity analytics with activity classification.

use clap::{Parser, Subcommand};
use lumen_sensor_agent::{
    config::{Config, Profile},
    sensor::{LightSensor, Pattern, ReplaySensor, SimulatedSensor},
    sink::{ConsoleSink, JsonLinesSink, ReportSink},
    Agent, Pipeline, TickOutcome, VERSION,
};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lumen-sensor")]
#[command(version = VERSION)]
#[command(about = "Periodic light-intensity analytics with activity classification", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start sampling and report every full buffer generation
    Start {
        /// Reference profile (baseline or extended)
        #[arg(long)]
        profile: Option<Profile>,

        /// Configuration file (JSON); overrides --profile
        #[arg(long)]
        config: Option<PathBuf>,

        /// Sample source (simulated or replay)
        #[arg(long, default_value = "simulated")]
        source: String,

        /// Waveform for the simulated source (constant, sine, step, noise)
        #[arg(long, default_value = "noise")]
        pattern: Pattern,

        /// Seed for the simulated source
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Raw code file for the replay source ("-" for stdin)
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Override the sampling interval in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Stop after this many reports
        #[arg(long)]
        generations: Option<u64>,

        /// Emit reports as JSON lines instead of text
        #[arg(long)]
        json: bool,

        /// Do not print each reading as it arrives
        #[arg(long)]
        quiet_readings: bool,
    },

    /// Reduce one generation of lux values given on the command line
    Analyze {
        /// Comma-separated lux values; count must equal the buffer capacity
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        samples: Vec<f64>,

        /// Reference profile (baseline or extended)
        #[arg(long)]
        profile: Option<Profile>,

        /// Configuration file (JSON); overrides --profile
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Reference profile (baseline or extended)
        #[arg(long)]
        profile: Option<Profile>,

        /// Configuration file (JSON); overrides --profile
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the reference profiles
    Profiles,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            profile,
            config,
            source,
            pattern,
            seed,
            input,
            interval_ms,
            generations,
            json,
            quiet_readings,
        } => {
            let mut config = resolve_config(profile, config.as_deref());
            if let Some(ms) = interval_ms {
                config.sample_interval = Duration::from_millis(ms.max(1));
            }
            if quiet_readings {
                config.echo_readings = false;
            }
            let sensor = create_sensor(&source, pattern, seed, input.as_deref());
            cmd_start(config, sensor, generations, json);
        }
        Commands::Analyze {
            samples,
            profile,
            config,
            json,
        } => {
            cmd_analyze(resolve_config(profile, config.as_deref()), &samples, json);
        }
        Commands::Config { profile, config } => {
            cmd_config(resolve_config(profile, config.as_deref()));
        }
        Commands::Profiles => {
            cmd_profiles();
        }
    }
}

/// Logs go to stderr so stdout carries only reports.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn resolve_config(profile: Option<Profile>, path: Option<&Path>) -> Config {
    let result = match (path, profile) {
        (Some(path), _) => Config::load_from(path),
        (None, Some(profile)) => Ok(Config::for_profile(profile)),
        (None, None) => Config::load(),
    };

    let config = match result {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    config
}

fn create_sensor(
    source: &str,
    pattern: Pattern,
    seed: u64,
    input: Option<&Path>,
) -> Box<dyn LightSensor> {
    match source.trim().to_lowercase().as_str() {
        "simulated" => Box::new(SimulatedSensor::new(pattern, seed)),
        "replay" => match input {
            Some(path) if path == Path::new("-") => {
                Box::new(ReplaySensor::new(io::stdin().lock(), "stdin"))
            }
            Some(path) => match File::open(path) {
                Ok(file) => Box::new(ReplaySensor::new(
                    BufReader::new(file),
                    path.display().to_string(),
                )),
                Err(e) => {
                    eprintln!("Error opening {path:?}: {e}");
                    std::process::exit(1);
                }
            },
            None => {
                eprintln!("Error: --source replay requires --input <FILE|->");
                std::process::exit(1);
            }
        },
        other => {
            eprintln!("Error: unknown source '{other}' (expected simulated or replay)");
            std::process::exit(1);
        }
    }
}

fn cmd_start(config: Config, sensor: Box<dyn LightSensor>, generations: Option<u64>, json: bool) {
    let chatty = !json;
    if chatty {
        println!("Lumen Sensor Agent v{VERSION}");
        println!();
        println!("Starting sampling...");
        println!("  Profile: {}", config.profile);
        println!("  Source: {}", sensor.describe());
        println!("  Buffer capacity: {}", config.buffer_capacity);
        println!("  Interval: {}ms", config.sample_interval.as_millis());
        println!();
        println!("Press Ctrl+C to stop");
        println!();
    }

    let interval = config.sample_interval;
    let echo_readings = config.echo_readings;
    let pipeline = match Pipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let sink: Box<dyn ReportSink> = if json {
        Box::new(JsonLinesSink::stdout())
    } else {
        Box::new(ConsoleSink::stdout(echo_readings))
    };
    let mut agent = Agent::new(sensor, pipeline, sink);

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    ctrlc_handler(running.clone());

    let ticker = crossbeam_channel::tick(interval);
    let mut reports = 0u64;

    while running.load(Ordering::SeqCst) {
        match ticker.recv_timeout(Duration::from_millis(100)) {
            Ok(_) => match agent.tick() {
                Ok(TickOutcome::Reported(_)) => {
                    reports += 1;
                    if generations.is_some_and(|limit| reports >= limit) {
                        break;
                    }
                }
                Ok(TickOutcome::Exhausted) => {
                    if chatty {
                        println!("Input exhausted.");
                    }
                    break;
                }
                Ok(TickOutcome::Buffered) | Ok(TickOutcome::Skipped(_)) => {}
                Err(e) => {
                    eprintln!("Error writing output: {e}");
                    break;
                }
            },
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                eprintln!("Timer disconnected unexpectedly");
                break;
            }
        }
    }

    let pending = agent.pipeline().pending();
    if pending > 0 {
        tracing::info!(pending, "discarding partial generation");
    }

    if chatty {
        println!();
        println!("Stopping sampling...");
        println!();
        println!("{}", agent.log().summary());
    } else {
        eprintln!("{}", agent.log().summary());
    }
}

fn cmd_analyze(config: Config, samples: &[f64], json: bool) {
    if samples.len() != config.buffer_capacity {
        eprintln!(
            "Error: expected {} samples for profile {}, got {}",
            config.buffer_capacity,
            config.profile,
            samples.len()
        );
        std::process::exit(1);
    }

    let mut pipeline = match Pipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let Some(report) = samples.iter().find_map(|&lux| pipeline.ingest(lux)) else {
        eprintln!("Error: samples did not complete a generation");
        std::process::exit(1);
    };

    let result = if json {
        JsonLinesSink::stdout().report(&report)
    } else {
        ConsoleSink::stdout(false).report(&report)
    };
    if let Err(e) = result {
        eprintln!("Error writing report: {e}");
        std::process::exit(1);
    }
}

fn cmd_config(config: Config) {
    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

fn cmd_profiles() {
    for profile in Profile::ALL {
        println!("{:<10} {}", profile.name(), profile.description());
    }
}

/// Set up Ctrl+C handler.
fn ctrlc_handler(running: Arc<AtomicBool>) {
    if let Err(e) = ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    }) {
        eprintln!("Warning: could not install Ctrl+C handler: {e}");
    }
}
