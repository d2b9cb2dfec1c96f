//! Indicator error types.

use thiserror::Error;

/// Errors that can occur while configuring or computing indicators.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// A period or window was zero
    #[error("period must be positive: {0}")]
    ZeroPeriod(&'static str),

    /// Invalid parameter combination
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl IndicatorError {
    /// Creates an `InvalidParams` error with a message.
    #[must_use]
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        IndicatorError::InvalidParams(msg.into())
    }
}
