//! Metrics error types.

use thiserror::Error;

/// Errors that can occur while summarizing a run.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Nothing to summarize
    #[error("equity curve is empty")]
    EmptyEquityCurve,

    /// Starting cash is negative or not finite
    #[error("invalid initial cash: {0}")]
    InvalidInitialCash(f64),
}
