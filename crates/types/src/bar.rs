use chrono::NaiveDateTime;

/// One OHLCV bar.
/// `timestamp` is the bar's wall-clock label as written by the data vendor (no timezone).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bar {
    /// Bar timestamp
    pub timestamp: NaiveDateTime,
    /// Open price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Close price
    pub close: f64,
    /// Volume
    pub volume: f64,
}

impl Bar {
    /// Absolute candle body size, `|open - close|`.
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.open - self.close).abs()
    }

    /// Upper edge of the candle body.
    #[must_use]
    pub fn body_top(&self) -> f64 {
        self.open.max(self.close)
    }

    /// Lower edge of the candle body.
    #[must_use]
    pub fn body_bottom(&self) -> f64 {
        self.open.min(self.close)
    }

    /// Typical price `(high + low + close) / 3`.
    #[must_use]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// A bar together with its derived indicator fields.
///
/// Every indicator is `None` until its trailing window is full. Consumers must
/// treat `None` as "not yet available" and never substitute a default.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IndicatedBar {
    /// Underlying OHLCV bar
    pub bar: Bar,
    /// MACD line (fast EMA - slow EMA)
    pub macd_line: Option<f64>,
    /// MACD signal line (EMA of the MACD line)
    pub macd_signal: Option<f64>,
    /// MACD histogram (line - signal)
    pub macd_histogram: Option<f64>,
    /// Relative strength index, bounded to [0, 100]
    pub rsi: Option<f64>,
    /// Average true range
    pub atr: Option<f64>,
    /// Rolling mean of `atr`
    pub atr_mean: Option<f64>,
    /// Volume-weighted average price
    pub vwap: Option<f64>,
    /// Simple moving average overlay of close
    #[serde(default)]
    pub sma: Option<f64>,
    /// Exponential moving average overlay of close
    #[serde(default)]
    pub ema: Option<f64>,
}

impl IndicatedBar {
    /// Wraps a bar with every indicator unavailable.
    #[must_use]
    pub fn bare(bar: Bar) -> Self {
        Self {
            bar,
            macd_line: None,
            macd_signal: None,
            macd_histogram: None,
            rsi: None,
            atr: None,
            atr_mean: None,
            vwap: None,
            sma: None,
            ema: None,
        }
    }

    /// Shorthand for `self.bar.timestamp`.
    #[must_use]
    pub fn timestamp(&self) -> NaiveDateTime {
        self.bar.timestamp
    }

    /// Shorthand for `self.bar.close`.
    #[must_use]
    pub fn close(&self) -> f64 {
        self.bar.close
    }
}
