//! `signalbench` command-line front end.
//!
//! Subcommands:
//! - `backtest`: indicator-threshold backtest over a bar table
//! - `indicators`: annotate a raw OHLCV table with indicator columns
//! - `engulfing`: engulfing-pattern study with forward trend labels

#![deny(clippy::all)]
#![warn(clippy::pedantic)]

mod commands;
mod logging;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::{BacktestArgs, EngulfingArgs, IndicatorsArgs};
use signalbench_backtest::BacktestError;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "signalbench", version, about = "Single-asset signal backtesting toolkit")]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the indicator-threshold backtest
    Backtest(BacktestArgs),
    /// Compute indicator columns for a raw OHLCV table
    Indicators(IndicatorsArgs),
    /// Detect engulfing patterns and score them against future trends
    Engulfing(EngulfingArgs),
}

fn dispatch(command: &Command) -> Result<(), BacktestError> {
    match command {
        Command::Backtest(args) => commands::backtest(args),
        Command::Indicators(args) => commands::indicators(args),
        Command::Engulfing(args) => commands::engulfing(args),
    }
}

/// Config errors exit with 2, everything else with 1.
fn exit_code(err: &BacktestError) -> u8 {
    if err.is_config_error() { 2 } else { 1 }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match dispatch(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(category = err.error_category(), "{err}");
            ExitCode::from(exit_code(&err))
        }
    }
}
