//! Header resolution for bar tables.

use csv::StringRecord;

use crate::error::DataError;

/// Required OHLCV headers, matched case-insensitively.
pub const REQUIRED_COLUMNS: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

/// Optional indicator column of a bar table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorColumn {
    /// MACD line
    MacdLine,
    /// MACD signal line
    MacdSignal,
    /// MACD histogram
    MacdHistogram,
    /// RSI
    Rsi,
    /// Average true range
    Atr,
    /// Rolling ATR mean
    AtrMean,
    /// VWAP
    Vwap,
    /// SMA overlay
    Sma,
    /// EMA overlay
    Ema,
}

impl IndicatorColumn {
    /// Every indicator column in output order.
    pub const ALL: [IndicatorColumn; 9] = [
        IndicatorColumn::MacdLine,
        IndicatorColumn::MacdSignal,
        IndicatorColumn::MacdHistogram,
        IndicatorColumn::Rsi,
        IndicatorColumn::Atr,
        IndicatorColumn::AtrMean,
        IndicatorColumn::Vwap,
        IndicatorColumn::Sma,
        IndicatorColumn::Ema,
    ];

    /// Columns the threshold generator reads.
    pub const DECISION_INPUTS: [IndicatorColumn; 3] = [
        IndicatorColumn::MacdHistogram,
        IndicatorColumn::Rsi,
        IndicatorColumn::Atr,
    ];

    /// Header written to output tables.
    #[must_use]
    pub fn header(self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted input headers; the first is canonical.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            IndicatorColumn::MacdLine => &["MACD_line"],
            IndicatorColumn::MacdSignal => &["MACD_signal"],
            IndicatorColumn::MacdHistogram => &["MACD_histogram", "MACD_hist"],
            IndicatorColumn::Rsi => &["RSI_14", "rsi"],
            IndicatorColumn::Atr => &["ATR_14", "atr"],
            IndicatorColumn::AtrMean => &["ATR_mean"],
            IndicatorColumn::Vwap => &["VWAP"],
            IndicatorColumn::Sma => &["SMA_50", "sma"],
            IndicatorColumn::Ema => &["EMA_200", "ema"],
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Positions of the known columns inside a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    /// Indices of `timestamp, open, high, low, close, volume`
    pub ohlcv: [usize; 6],
    indicators: [Option<usize>; 9],
}

impl ColumnMap {
    /// Resolves a header row.
    ///
    /// # Errors
    /// [`DataError::MissingColumn`] when one of [`REQUIRED_COLUMNS`] is absent.
    pub fn resolve(headers: &StringRecord) -> Result<Self, DataError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let mut ohlcv = [0usize; 6];
        for (slot, name) in ohlcv.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = find(name).ok_or_else(|| DataError::MissingColumn(name.to_string()))?;
        }

        let mut indicators = [None; 9];
        for column in IndicatorColumn::ALL {
            indicators[column.slot()] = column.aliases().iter().find_map(|alias| find(alias));
        }

        Ok(Self { ohlcv, indicators })
    }

    /// Index of an indicator column, if present.
    #[must_use]
    pub fn indicator(&self, column: IndicatorColumn) -> Option<usize> {
        self.indicators[column.slot()]
    }

    /// True when the column is present.
    #[must_use]
    pub fn has(&self, column: IndicatorColumn) -> bool {
        self.indicator(column).is_some()
    }

    /// True when every column the threshold generator needs is present.
    /// `ATR_mean` is not required since it can be derived from `ATR_14`.
    #[must_use]
    pub fn has_decision_inputs(&self) -> bool {
        IndicatorColumn::DECISION_INPUTS
            .iter()
            .all(|&column| self.has(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_case_insensitive_and_aliases() {
        let headers = StringRecord::from(vec![
            "Timestamp", "Open", "High", "Low", "Close", "Volume", "MACD_hist", "rsi", "ATR_14",
        ]);
        let map = ColumnMap::resolve(&headers).unwrap();

        assert_eq!(map.ohlcv, [0, 1, 2, 3, 4, 5]);
        assert_eq!(map.indicator(IndicatorColumn::MacdHistogram), Some(6));
        assert_eq!(map.indicator(IndicatorColumn::Rsi), Some(7));
        assert_eq!(map.indicator(IndicatorColumn::Atr), Some(8));
        assert!(!map.has(IndicatorColumn::AtrMean));
        assert!(map.has_decision_inputs());
    }

    #[test]
    fn test_missing_required_column() {
        let headers = StringRecord::from(vec!["timestamp", "open", "high", "low", "close"]);
        let err = ColumnMap::resolve(&headers).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "volume"));
    }

    #[test]
    fn test_canonical_headers() {
        assert_eq!(IndicatorColumn::MacdHistogram.header(), "MACD_histogram");
        assert_eq!(IndicatorColumn::Rsi.header(), "RSI_14");
        assert_eq!(IndicatorColumn::Ema.header(), "EMA_200");
    }
}
