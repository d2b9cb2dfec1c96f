//! Data-layer error types.

use thiserror::Error;

/// Errors that can occur while loading, validating, or writing bar tables.
#[derive(Debug, Error)]
pub enum DataError {
    /// A required file was not found or could not be opened.
    #[error("File not found: {0} ({1})")]
    FileNotFound(String, String),

    /// The delimited text could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required column is missing from the header row.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A cell that must be numeric could not be parsed.
    #[error("Invalid number in column {column} at row {row}: '{value}'")]
    InvalidNumber {
        /// Column header.
        column: String,
        /// Zero-based data row (header excluded, file order).
        row: usize,
        /// Offending cell text.
        value: String,
    },

    /// A timestamp cell matched none of the accepted formats.
    #[error("Invalid timestamp at row {row}: '{value}' (accepted formats: {formats})")]
    InvalidTimestamp {
        /// Zero-based data row (header excluded, file order).
        row: usize,
        /// Offending cell text.
        value: String,
        /// Accepted formats, comma separated.
        formats: String,
    },

    /// No rows were loaded.
    #[error("Empty data")]
    EmptyData,

    /// Data violated an invariant (non-finite prices, ordering, OHLC consistency).
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// Output columns do not line up with the rows being written.
    #[error("Length mismatch: {what} has {actual} entries, expected {expected}")]
    LengthMismatch {
        /// Name of the mismatched series.
        what: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },
}
