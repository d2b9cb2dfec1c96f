//! Backtest error types.

use thiserror::Error;

/// Errors that can occur during backtest orchestration.
#[derive(Debug, Error)]
pub enum BacktestError {
    /// JSON config parse error
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error
    #[error("config validation error: {0}")]
    ConfigValidation(String),

    /// Report serialization error
    #[error("result serialization error: {0}")]
    ResultSerialize(String),

    /// Data loading, validation or writing error
    #[error("data error: {0}")]
    Data(#[from] signalbench_data::DataError),

    /// Indicator computation error
    #[error("indicator error: {0}")]
    Indicator(#[from] signalbench_indicators::IndicatorError),

    /// Portfolio error
    #[error("portfolio error: {0}")]
    Portfolio(#[from] signalbench_portfolio::PortfolioError),

    /// Strategy error
    #[error("strategy error: {0}")]
    Strategy(#[from] signalbench_strategy::StrategyError),

    /// Metrics error
    #[error("metrics error: {0}")]
    Metrics(#[from] signalbench_metrics::MetricsError),

    /// Bars and decisions do not pair up
    #[error("{bars} bars but {decisions} decisions")]
    LengthMismatch {
        /// Number of bars
        bars: usize,
        /// Number of decisions
        decisions: usize,
    },
}

impl BacktestError {
    /// Returns true if this is a config parse/validation error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BacktestError::ConfigParse(_) | BacktestError::ConfigValidation(_)
        )
    }

    /// Returns the error category.
    /// Categories: `config`, `market_data`, `execution`, `strategy`, `runtime`
    #[must_use]
    pub fn error_category(&self) -> &'static str {
        match self {
            BacktestError::ConfigParse(_) | BacktestError::ConfigValidation(_) => "config",

            BacktestError::Data(_) => "market_data",

            BacktestError::Portfolio(_) | BacktestError::LengthMismatch { .. } => "execution",

            BacktestError::Strategy(_) => "strategy",

            BacktestError::Indicator(_)
            | BacktestError::Metrics(_)
            | BacktestError::ResultSerialize(_) => "runtime",
        }
    }
}
