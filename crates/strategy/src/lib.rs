//! Signalbench Strategy
//!
//! Signal generation for the backtest pipeline and the engulfing pattern study.
//!
//! # Features
//! - `SignalGenerator` trait mapping one bar's indicator snapshot to a decision
//! - `ThresholdStrategy` with conservative, aggressive and custom policies
//! - Engulfing pattern detection, forward trend labeling and pattern precision
//!
//! # Example
//! ```ignore
//! use signalbench_strategy::{ThresholdStrategy, generate_decisions};
//!
//! let strategy = ThresholdStrategy::new(Policy::Aggressive)?;
//! let run = generate_decisions(&strategy, &bars);
//! ```

#![deny(clippy::all)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod impl_;
pub mod runner;
pub mod traits;
pub mod trend;

// Re-export main types
pub use error::StrategyError;
pub use runner::{
    EngulfingStudy, SignalRun, generate_decisions, has_decision_inputs, study_engulfing,
};
pub use traits::SignalGenerator;
pub use trend::{
    DEFAULT_HORIZON, DEFAULT_PIP_THRESHOLD, PatternPrecision, TrendLabel, classify_future_trend,
    label_trends, pattern_precision,
};

// Re-export generator implementations
pub use impl_::engulfing::{DEFAULT_MIN_BODY, EngulfingDetector, EngulfingPattern};
pub use impl_::threshold::ThresholdStrategy;
