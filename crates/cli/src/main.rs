//! accelctl - Pointer Acceleration Control CLI
//!
//! Inspect parameter sets, replay motion scripts through the engine, convert
//! legacy settings and author custom curves.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;
mod script;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::*;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "accelctl")]
#[command(about = "Pointer Acceleration Control CLI - Tune, simulate and author acceleration curves")]
#[command(version)]
#[command(long_about = "
accelctl drives the fixed-point pointer acceleration engine offline.
It prints effective parameters, replays timestamped motion scripts,
converts legacy settings and edits custom curves into lookup tables.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show effective parameters after overrides
    Params(ParamArgs),

    /// Replay a motion script through the engine
    Simulate {
        #[command(flatten)]
        params: ParamArgs,

        /// Script file (reads stdin when omitted)
        #[arg(short, long, value_name = "FILE")]
        script: Option<PathBuf>,
    },

    /// Curve inspection and authoring commands
    #[command(subcommand)]
    Curve(CurveCommands),

    /// Convert legacy parameters to the current set
    ConvertLegacy {
        /// Legacy assignment (repeatable), e.g. --legacy SpeedCap=40
        #[arg(short, long, value_name = "KEY=VALUE")]
        legacy: Vec<String>,

        /// Copy values across without normalizing them
        #[arg(long)]
        literal: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("accelctl={},pointeraccel={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(exit_code)
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Params(args) => params::execute(args, cli.json),
        Commands::Simulate { params, script } => {
            simulate::execute(params, script.as_deref(), cli.json)
        }
        Commands::Curve(cmd) => curve::execute(cmd, cli.json),
        Commands::ConvertLegacy { legacy: assignments, literal } => {
            legacy::execute(assignments, *literal, cli.json)
        }
    }
}
