//! Two-bar engulfing candlestick patterns

use std::fmt;

use signalbench_types::Bar;

use crate::error::StrategyError;

/// Default minimum candle body for both bars of a pattern.
pub const DEFAULT_MIN_BODY: f64 = 0.003;

/// Engulfing pattern detected on a bar, with its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngulfingPattern {
    /// No pattern (code 0)
    None,
    /// Up bar followed by a down bar whose body covers it (code 1).
    /// Historically labeled "bullish engulfing"; paired with trend code 1.
    Bullish,
    /// Down bar followed by an up bar whose body covers it (code 2).
    /// Historically labeled "bearish engulfing"; paired with trend code 2.
    Bearish,
}

impl EngulfingPattern {
    /// Numeric code used in output tables.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            EngulfingPattern::None => 0,
            EngulfingPattern::Bullish => 1,
            EngulfingPattern::Bearish => 2,
        }
    }
}

impl fmt::Display for EngulfingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EngulfingPattern::None => "none",
            EngulfingPattern::Bullish => "bullish engulfing",
            EngulfingPattern::Bearish => "bearish engulfing",
        };
        f.write_str(label)
    }
}

/// Detects engulfing patterns between consecutive bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngulfingDetector {
    /// Both bodies must strictly exceed this size
    pub min_body: f64,
}

impl Default for EngulfingDetector {
    fn default() -> Self {
        Self {
            min_body: DEFAULT_MIN_BODY,
        }
    }
}

impl EngulfingDetector {
    /// Creates a detector with a custom minimum body.
    ///
    /// # Errors
    /// [`StrategyError::InvalidParams`] when `min_body` is negative or not finite.
    pub fn new(min_body: f64) -> Result<Self, StrategyError> {
        if !min_body.is_finite() || min_body < 0.0 {
            return Err(StrategyError::InvalidParams(format!(
                "min_body must be finite and non-negative, got {min_body}"
            )));
        }
        Ok(Self { min_body })
    }

    /// Classifies bar `cur` against its predecessor `prev`.
    #[must_use]
    pub fn classify(&self, prev: &Bar, cur: &Bar) -> EngulfingPattern {
        if prev.body() <= self.min_body || cur.body() <= self.min_body {
            return EngulfingPattern::None;
        }

        let prev_up = prev.open < prev.close;
        let prev_down = prev.open > prev.close;
        let cur_up = cur.open < cur.close;
        let cur_down = cur.open > cur.close;

        if prev_up && cur_down && cur.open >= prev.close && cur.close < prev.open {
            EngulfingPattern::Bullish
        } else if prev_down && cur_up && cur.open <= prev.close && cur.close > prev.open {
            EngulfingPattern::Bearish
        } else {
            EngulfingPattern::None
        }
    }

    /// Pattern for every bar; bar 0 is always [`EngulfingPattern::None`].
    #[must_use]
    pub fn detect(&self, bars: &[Bar]) -> Vec<EngulfingPattern> {
        std::iter::once(EngulfingPattern::None)
            .chain(bars.windows(2).map(|w| self.classify(&w[0], &w[1])))
            .take(bars.len())
            .collect()
    }
}
