//! `evctl-sim` runs controller scenarios and validates configuration files.
//!
//! **Usage:**
//! ```text
//! evctl-sim run <scenario.toml> [--config <file>]
//! evctl-sim check-config <file>
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`). Exits non-zero on the
//! first failed expectation.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

use evctl_core::ControllerConfig;
use evctl_sim::config::load_config;
use evctl_sim::{Scenario, Testbench};

/// Cycle-level simulator for the EV controller core
#[derive(Parser, Debug)]
#[command(name = "evctl-sim")]
#[command(version)]
#[command(about = "Run EV controller scenarios against the cycle model", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scenario and check its expectations
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// Controller configuration file (defaults when omitted)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Parse and validate a configuration file
    CheckConfig {
        /// Configuration file
        path: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = execute(args) {
        error!("{:#}", err);
        process::exit(1);
    }
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Run { scenario, config } => run(&scenario, config),
        Command::CheckConfig { path } => check_config(&path),
    }
}

fn run(path: &Path, config: Option<PathBuf>) -> Result<()> {
    let config = match config {
        Some(path) => load_config(&path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => ControllerConfig::default(),
    };

    let scenario = Scenario::load(path)
        .with_context(|| format!("loading scenario {}", path.display()))?;
    let mut bench = Testbench::new(config).context("building testbench")?;

    let report = scenario
        .run(&mut bench)
        .with_context(|| format!("scenario `{}` failed", scenario.name))?;

    println!("{}", report.name);
    println!("{}", "=".repeat(report.name.len()));
    for step in &report.steps {
        println!(
            "{:>6}  uo_out={:08b}  uio_out={:>3}  heat={:>4}  {}",
            step.cycle, step.uo_out, step.uio_out, step.status.heat, step.name
        );
    }
    println!();
    println!("{} steps passed", report.steps.len());
    Ok(())
}

fn check_config(path: &Path) -> Result<()> {
    let config = load_config(path)
        .with_context(|| format!("checking configuration {}", path.display()))?;
    info!("{} is valid", path.display());
    println!("{:#?}", config);
    Ok(())
}
