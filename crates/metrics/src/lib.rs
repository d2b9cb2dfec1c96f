//! Signalbench Metrics
//!
//! Summarizes a backtest's equity curve by calendar month and over the whole
//! run, with drawdown and trade statistics.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Summary entrypoint.
pub mod compute;
/// Equity-curve metric helpers.
pub mod equity_metrics;
/// Metrics error types.
pub mod error;
/// Calendar aggregation.
pub mod monthly;
/// Console report rendering.
pub mod report;
/// Trade-based metric helpers.
pub mod trade_metrics;

pub use compute::{PerformanceSummary, summarize};
pub use equity_metrics::{DrawdownStats, compute_drawdown};
pub use error::MetricsError;
pub use monthly::{monthly_summary, total_months, trading_days};
pub use trade_metrics::trade_stats;
