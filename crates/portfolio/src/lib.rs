//! # signalbench portfolio
//!
//! All-in/all-out portfolio state machine.
//!
//! ## Overview
//!
//! - **Portfolio**: cash/shares state, open cost basis, completed round trips
//!   and the per-bar equity curve
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use signalbench_portfolio::{Fill, Portfolio};
//! use signalbench_types::{Bar, Decision, IndicatedBar};
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(9, 30, 0).unwrap();
//! let bar = IndicatedBar::bare(Bar {
//!     timestamp: ts,
//!     open: 100.0,
//!     high: 100.0,
//!     low: 100.0,
//!     close: 100.0,
//!     volume: 1_000.0,
//! });
//!
//! let mut portfolio = Portfolio::new(10_000.0).unwrap();
//! let fill = portfolio.apply(0, &bar, &Decision::buy("entry")).unwrap();
//! assert!(matches!(fill, Some(Fill::Buy { .. })));
//! assert_eq!(portfolio.mark(&bar).unwrap(), 10_000.0);
//! ```

#![deny(clippy::all)]

pub mod error;
pub mod portfolio;

// Re-exports for convenience
pub use error::PortfolioError;
pub use portfolio::{Fill, Portfolio};
