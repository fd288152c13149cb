//! Headless engagement runner.
//!
//! Simulates combat scenarios without any game attached and prints the
//! outcome as JSON on stdout; logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Resolve one engagement from a scenario file
//! cargo run -p fastsim_headless -- run --scenario fights/artillery_line.ron
//!
//! # Cap the frame budget and enable artillery splash
//! cargo run -p fastsim_headless -- run --scenario fights/artillery_line.ron --frames 96 --splash
//!
//! # Determinism sweep: resolve the same scenario 500 times in parallel
//! cargo run -p fastsim_headless -- batch --scenario fights/artillery_line.ron --runs 500
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use fastsim_headless::batch::run_batch;
use fastsim_headless::report::EngagementReport;
use fastsim_headless::scenario::{Scenario, ScenarioError};

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Parser)]
#[command(name = "fastsim")]
#[command(about = "Headless combat engagement runner")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a single engagement and print a JSON report
    Run {
        /// Scenario file to load; omit for the built-in skirmish
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Override the scenario's frame budget
        #[arg(short, long)]
        frames: Option<i32>,

        /// Force artillery splash on regardless of the scenario
        #[arg(long)]
        splash: bool,
    },

    /// Run a scenario repeatedly in parallel and verify determinism
    Batch {
        /// Scenario file to load; omit for the built-in skirmish
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Number of runs
        #[arg(short, long, default_value = "100")]
        runs: usize,
    },
}

fn load(path: Option<&PathBuf>) -> Result<Scenario, ScenarioError> {
    match path {
        Some(path) => Scenario::load(path),
        None => Ok(Scenario::default_skirmish()),
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Commands::Run {
            scenario,
            frames,
            splash,
        } => {
            let mut scenario = load(scenario.as_ref())?;
            if let Some(frames) = frames {
                scenario.frames = *frames;
            }
            scenario.splash |= *splash;

            let mut sim = scenario.build_simulator();
            let simulated = sim.simulate(scenario.frames, scenario.splash);
            let report = EngagementReport::from_simulator(&scenario.name, &sim, simulated);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Batch { scenario, runs } => {
            let scenario = load(scenario.as_ref())?;
            let report = run_batch(&scenario, *runs);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
