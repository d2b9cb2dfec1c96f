//! Error types for the portfolio crate.

use thiserror::Error;

/// Errors that can occur during portfolio operations.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Starting cash is negative or not finite
    #[error("invalid initial cash: {0}")]
    InvalidInitialCash(f64),

    /// Trade attempted at a non-positive or non-finite close
    #[error("invalid close price {close} at row {row}")]
    InvalidPrice {
        /// Row index of the bar
        row: usize,
        /// Offending close price
        close: f64,
    },

    /// Non-finite portfolio value
    #[error("portfolio value is not finite: {field}={value}")]
    NonFiniteValue {
        /// Name of the field
        field: String,
        /// Non-finite value encountered
        value: f64,
    },
}
