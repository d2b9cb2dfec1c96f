//! Signalbench Backtest
//!
//! Orchestrates bar loading, indicator preparation, decision generation,
//! portfolio simulation and performance summary for a single-asset backtest.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

pub mod error;
pub mod runner;
pub mod simulator;
pub mod warmup;

pub use error::BacktestError;
pub use runner::{
    BacktestReport, backtest_bars, prepare_bars, run_backtest, run_backtest_from_json,
    validate_config,
};
pub use simulator::{SimulationOutcome, run, simulate};
pub use warmup::{WarmupReport, report_warmup};
