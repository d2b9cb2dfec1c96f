//! Strategy error types

use thiserror::Error;

/// Strategy-specific errors
#[derive(Debug, Error)]
pub enum StrategyError {
    /// Invalid generator or labeling parameters
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Bar index outside the series
    #[error("Bar index {index} out of range for {len} bars")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Series length
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_invalid_params() {
        let err = StrategyError::InvalidParams("min_body must be finite".to_string());
        assert_eq!(err.to_string(), "Invalid parameters: min_body must be finite");
    }

    #[test]
    fn test_error_index_out_of_range() {
        let err = StrategyError::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(err.to_string(), "Bar index 5 out of range for 3 bars");
    }
}
