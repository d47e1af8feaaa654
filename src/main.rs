use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};

use sat_tracker::config::{parse_duration, Config};
use sat_tracker::predict::Propagator;
use sat_tracker::telemetry::{PathConfig, PathSample, PathSampler, TelemetryRecord};
use sat_tracker::tle::OrbitalElementRecord;
use sat_tracker::tracker::{SessionHandle, TelemetryObserver, Tracker};
use sat_tracker::{web, SystemClock};

#[derive(Parser)]
#[command(name = "sat-tracker")]
#[command(about = "Live SGP4 tracking of a single satellite")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a TLE file and print its elements
    Validate { tle: String },
    /// Print the ground track around an instant as JSON
    Path {
        tle: String,
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        #[arg(long)]
        samples: Option<usize>,
        #[arg(long, value_parser = parse_duration)]
        step: Option<Duration>,
        #[arg(long)]
        config: Option<String>,
    },
    /// Track a satellite, printing one JSON telemetry line per tick
    Track {
        tle: String,
        #[arg(long, default_value = "10s", value_parser = parse_duration)]
        duration: Duration,
        #[arg(long)]
        config: Option<String>,
    },
    /// Serve tracker control and telemetry over HTTP
    Serve {
        #[arg(long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { tle } => validate(&tle),
        Commands::Path {
            tle,
            at,
            samples,
            step,
            config,
        } => path(&tle, at, samples, step, config.as_deref()),
        Commands::Track {
            tle,
            duration,
            config,
        } => track(&tle, duration, config.as_deref()).await,
        Commands::Serve { config } => serve(config.as_deref()).await,
    }
}

fn load_config(path: Option<&str>) -> Result<Config, ExitCode> {
    match path {
        Some(path) => Config::from_file(path).map_err(|e| {
            eprintln!("Error reading config {}: {}", path, e);
            ExitCode::FAILURE
        }),
        None => Ok(Config::default()),
    }
}

fn read_tle(path: &str) -> Result<String, ExitCode> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("Error reading file: {}", e);
        ExitCode::FAILURE
    })
}

fn validate(path: &str) -> ExitCode {
    let text = match read_tle(path) {
        Ok(t) => t,
        Err(code) => return code,
    };

    match OrbitalElementRecord::parse(&text) {
        Ok(record) => {
            println!("TLE is valid: {}", record.name());
            println!("  catalog id:     {}", record.catalog_id());
            println!(
                "  designator:     {}",
                record.international_designator().unwrap_or("-")
            );
            println!("  epoch:          {}", record.epoch());
            println!("  inclination:    {:.4} deg", record.inclination_deg());
            println!("  eccentricity:   {:.7}", record.eccentricity());
            println!("  mean motion:    {:.8} rev/day", record.mean_motion());
            println!(
                "  period:         {:.2} min",
                record.orbital_period().num_milliseconds() as f64 / 60_000.0
            );
            println!(
                "  perigee/apogee: {:.1} / {:.1} km",
                record.perigee_altitude_km(),
                record.apogee_altitude_km()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Parse error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn path(
    path: &str,
    at: Option<DateTime<Utc>>,
    samples: Option<usize>,
    step: Option<Duration>,
    config: Option<&str>,
) -> ExitCode {
    let config = match load_config(config) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let text = match read_tle(path) {
        Ok(t) => t,
        Err(code) => return code,
    };

    let record = match OrbitalElementRecord::parse(&text) {
        Ok(r) => Arc::new(r),
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let propagator = match Propagator::new(record, config.tracker.max_epoch_offset) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Propagation error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let path_config = PathConfig {
        samples: samples.unwrap_or(config.tracker.path.samples),
        step: step.unwrap_or(config.tracker.path.step),
    };
    let sample = PathSampler::new(path_config).sample(&propagator, at.unwrap_or_else(Utc::now));

    match serde_json::to_string_pretty(&sample) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}

struct JsonLinesObserver;

impl TelemetryObserver for JsonLinesObserver {
    fn on_path(&self, session: &SessionHandle, path: &PathSample) {
        log::info!("Path for {} has {} points", session.name, path.len());
    }

    fn on_telemetry(&self, _session: &SessionHandle, telemetry: &TelemetryRecord) {
        match serde_json::to_string(telemetry) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Failed to serialize telemetry: {}", e),
        }
    }
}

async fn track(path: &str, duration: Duration, config: Option<&str>) -> ExitCode {
    let config = match load_config(config) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let text = match read_tle(path) {
        Ok(t) => t,
        Err(code) => return code,
    };

    let mut tracker = Tracker::new(
        config.tracker,
        Arc::new(SystemClock),
        Arc::new(JsonLinesObserver),
    );
    let handle = match tracker.start_tracking(&text).await {
        Ok(h) => h,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tokio::time::sleep(duration.to_std().unwrap_or_default()).await;

    let missed = tracker.status().missed_ticks;
    tracker.stop_tracking(&handle).await;
    if missed > 0 {
        log::warn!("{} ticks produced no telemetry", missed);
    }
    ExitCode::SUCCESS
}

async fn serve(config: Option<&str>) -> ExitCode {
    let config = match load_config(config) {
        Ok(c) => c,
        Err(code) => return code,
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
