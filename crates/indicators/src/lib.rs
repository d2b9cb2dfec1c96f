//! Signalbench Indicators
//!
//! Technical indicator engine for intraday bar series.
//!
//! # Available Indicators
//! - MACD: line, signal, histogram
//! - RSI: Relative Strength Index (Wilder smoothing)
//! - ATR: Average True Range (Wilder smoothing)
//! - VWAP: rolling Volume Weighted Average Price
//! - SMA / EMA: trend overlays
//!
//! Every series is oldest-first and uses `None` until its window is full.

pub mod annotate;
pub mod error;
pub mod impl_;
pub mod series;
pub mod traits;

// Re-export main types
pub use annotate::{annotate, decision_warmup_bars, fill_atr_mean, validate_settings};
pub use error::IndicatorError;
pub use traits::{Indicator, MultiOutputIndicator};

// Re-export indicator implementations
pub use impl_::{
    atr::ATR,
    ema::EMA,
    macd::{MACD, MacdResult},
    rsi::RSI,
    sma::SMA,
    vwap::VWAP,
};
