//! Bar table validation.

use signalbench_types::IndicatedBar;

use crate::error::DataError;

/// Validates a chronological bar sequence.
///
/// # Errors
/// - [`DataError::EmptyData`] when `bars` is empty.
/// - [`DataError::CorruptData`] for non-finite prices, negative volume,
///   inconsistent OHLC, or timestamps that are not strictly increasing.
pub fn validate_bars(bars: &[IndicatedBar]) -> Result<(), DataError> {
    if bars.is_empty() {
        return Err(DataError::EmptyData);
    }

    for (i, indicated) in bars.iter().enumerate() {
        let bar = &indicated.bar;
        if !bar.open.is_finite()
            || !bar.high.is_finite()
            || !bar.low.is_finite()
            || !bar.close.is_finite()
            || !bar.volume.is_finite()
        {
            return Err(DataError::CorruptData(format!(
                "NaN/Inf at index {i}: {bar:?}"
            )));
        }

        if bar.volume < 0.0 {
            return Err(DataError::CorruptData(format!(
                "Negative volume at index {i}: {}",
                bar.volume
            )));
        }

        if bar.low > bar.open
            || bar.low > bar.close
            || bar.high < bar.open
            || bar.high < bar.close
        {
            return Err(DataError::CorruptData(format!(
                "Invalid OHLC at index {i}: low={}, high={}, open={}, close={}",
                bar.low, bar.high, bar.open, bar.close
            )));
        }

        if i > 0 && bar.timestamp <= bars[i - 1].bar.timestamp {
            return Err(DataError::CorruptData(format!(
                "Non-monotonic timestamp at index {i}: {} <= {}",
                bar.timestamp,
                bars[i - 1].bar.timestamp
            )));
        }
    }

    Ok(())
}
