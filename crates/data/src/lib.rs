//! Signalbench Data
//!
//! CSV loading of bar tables, column resolution, validation, and the CSV
//! writers for every output table.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Header resolution and indicator column aliases.
pub mod columns;
/// Data-layer error types.
pub mod error;
/// CSV bar table loading.
pub mod loader;
/// Bar sequence validation.
pub mod validation;
/// Output table writers.
pub mod writer;

/// Re-export: resolved header positions.
pub use columns::ColumnMap;
/// Re-export: optional indicator column.
pub use columns::IndicatorColumn;
/// Re-export: data-layer error type.
pub use error::DataError;
/// Re-export: loaded bar table.
pub use loader::BarTable;
/// Re-export: loader options.
pub use loader::LoadOptions;
/// Re-export: load a bar table from disk.
pub use loader::load_bar_table;
/// Re-export: parse a timestamp against a format list.
pub use loader::parse_timestamp;
/// Re-export: load a bar table from a reader.
pub use loader::read_bar_table;
/// Re-export: bar validation.
pub use validation::validate_bars;
/// Re-export: rounding helper used by the indicator table writer.
pub use writer::round_to_decimals;
/// Re-export: indicator table writer.
pub use writer::write_indicator_table;
/// Re-export: per-bar ledger writer.
pub use writer::write_ledger;
/// Re-export: monthly summary writer.
pub use writer::write_monthly;
/// Re-export: engulfing pattern table writer.
pub use writer::write_pattern_table;
/// Re-export: trades table writer.
pub use writer::write_trades;
