//! signalbench types
//!
//! Core data structures shared by every stage of the pipeline: bars and their
//! indicator snapshots, decisions, portfolio state, equity points, trades,
//! monthly/overall statistics, and configuration.

#![deny(clippy::all)]

pub mod bar;
pub mod calendar;
pub mod config;
pub mod position;
pub mod result;
pub mod signal;
pub mod trade;

// Re-export main types for convenience
pub use bar::{Bar, IndicatedBar};
pub use calendar::YearMonth;
pub use config::{
    BacktestConfig, DEFAULT_TIMESTAMP_FORMAT, IndicatorMode, IndicatorSettings, Policy,
    Thresholds, VENDOR_TIMESTAMP_FORMAT, default_timestamp_formats,
};
pub use position::{PortfolioState, PositionState};
pub use result::{EquityPoint, LedgerRow, MonthlySummary, OverallStats, SignalCounts, TradeStats};
pub use signal::{Action, Decision};
pub use trade::Trade;
