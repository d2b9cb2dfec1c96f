//! Average True Range (ATR) indicator with Wilder smoothing

use signalbench_types::Bar;

use crate::traits::Indicator;

/// Average True Range (Wilder)
///
/// Seeded with the mean of the first `period` true ranges, then
/// `ATR = (prev_ATR * (n-1) + TR) / n`.
#[derive(Debug, Clone)]
pub struct ATR {
    /// Number of periods for ATR calculation
    pub period: usize,
}

impl ATR {
    /// Creates a new ATR indicator with the given period.
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// True Range for a bar given the previous close.
    ///
    /// TR = max(High - Low, |High - Prev_Close|, |Low - Prev_Close|)
    #[inline]
    fn true_range(bar: &Bar, prev_close: f64) -> f64 {
        let hl = bar.high - bar.low;
        let hc = (bar.high - prev_close).abs();
        let lc = (bar.low - prev_close).abs();
        hl.max(hc).max(lc)
    }

    /// True range series; the first bar has no previous close and uses High - Low.
    #[must_use]
    pub fn true_ranges(bars: &[Bar]) -> Vec<f64> {
        bars.iter()
            .enumerate()
            .map(|(i, bar)| match i {
                0 => bar.high - bar.low,
                _ => Self::true_range(bar, bars[i - 1].close),
            })
            .collect()
    }
}

impl Indicator for ATR {
    #[allow(clippy::cast_precision_loss)]
    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let len = bars.len();
        let mut result = vec![None; len];

        if self.period == 0 || len < self.period {
            return result;
        }

        let tr = Self::true_ranges(bars);
        let n = self.period as f64;
        let start_idx = self.period - 1;
        let mut atr = tr[..self.period].iter().sum::<f64>() / n;
        result[start_idx] = Some(atr);

        for i in (start_idx + 1)..len {
            atr = (atr * (n - 1.0) + tr[i]) / n;
            result[i] = Some(atr);
        }

        result
    }

    fn name(&self) -> &str {
        "ATR"
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }
}
