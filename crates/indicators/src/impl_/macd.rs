//! Moving Average Convergence Divergence (MACD)

use signalbench_types::Bar;

use crate::impl_::ema::EMA;
use crate::series::dense;
use crate::traits::MultiOutputIndicator;

/// MACD line, signal line and histogram.
///
/// `line = EMA(fast) - EMA(slow)`, `signal = EMA(signal_period)` of the line,
/// `histogram = line - signal`. All EMAs use `min_periods = span`, so the
/// signal line needs `slow + signal_period - 1` bars.
#[derive(Debug, Clone)]
pub struct MACD {
    /// Fast EMA span
    pub fast: usize,
    /// Slow EMA span
    pub slow: usize,
    /// Signal EMA span
    pub signal: usize,
}

/// MACD output series
#[derive(Debug, Clone, PartialEq)]
pub struct MacdResult {
    /// MACD line
    pub line: Vec<Option<f64>>,
    /// Signal line
    pub signal: Vec<Option<f64>>,
    /// Histogram
    pub histogram: Vec<Option<f64>>,
}

impl MACD {
    /// Creates a new MACD indicator.
    #[must_use]
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self { fast, slow, signal }
    }
}

impl Default for MACD {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl MultiOutputIndicator for MACD {
    type Output = MacdResult;

    fn compute_all(&self, bars: &[Bar]) -> MacdResult {
        let closes = dense(bars.iter().map(|b| b.close));
        let fast = EMA::new(self.fast).compute_series(&closes);
        let slow = EMA::new(self.slow).compute_series(&closes);

        let line: Vec<Option<f64>> = fast
            .iter()
            .zip(&slow)
            .map(|(f, s)| Some((*f)? - (*s)?))
            .collect();
        let signal = EMA::new(self.signal).compute_series(&line);
        let histogram = line
            .iter()
            .zip(&signal)
            .map(|(l, s)| Some((*l)? - (*s)?))
            .collect();

        MacdResult {
            line,
            signal,
            histogram,
        }
    }

    fn name(&self) -> &str {
        "MACD"
    }

    fn warmup_periods(&self) -> usize {
        self.fast.max(self.slow) + self.signal - 1
    }

    fn output_names(&self) -> &'static [&'static str] {
        &["line", "signal", "histogram"]
    }
}
