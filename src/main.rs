//! Binary entry point for catalog-state.
//!
//! Developer harness for replaying recorded alert actions and inspecting the
//! effective configuration.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr/print_stdout in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
#![allow(clippy::multiple_crate_versions)]

use catalog_state::StateConfig;
use catalog_state::cli::{ReplaySummary, replay_file};
use catalog_state::observability::{self, LoggingConfig};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// catalog-state - Normalized collection state for data-catalog alerts.
#[derive(Parser)]
#[command(name = "catalog-state")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "CATALOG_STATE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Replay a file of JSON alert actions (one per line) and print the result.
    Replay {
        /// File containing one action per line.
        file: PathBuf,
    },

    /// Manage configuration.
    Config {
        /// Show current configuration.
        #[arg(long)]
        show: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init(LoggingConfig::from_settings(
        Some(&config.logging),
        cli.verbose,
    )) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Loads configuration from an explicit path or the default locations.
fn load_config(path: Option<&Path>) -> catalog_state::Result<StateConfig> {
    match path {
        Some(path) => StateConfig::load_from_file(path),
        None => Ok(StateConfig::load_default()),
    }
}

/// Runs the selected command.
fn run_command(command: Commands, config: &StateConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Replay { file } => cmd_replay(&file, config),
        Commands::Config { show } => cmd_config(config, show),
    }
}

/// Replays actions and prints a JSON summary.
fn cmd_replay(file: &Path, config: &StateConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = replay_file(file, config)?;
    let summary = ReplaySummary::of(&store);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Prints the effective configuration as TOML.
fn cmd_config(config: &StateConfig, show: bool) -> Result<(), Box<dyn std::error::Error>> {
    if show {
        println!("{}", toml::to_string_pretty(config)?);
    } else {
        println!("Use --show to print the effective configuration");
    }
    Ok(())
}
