//! Simple Moving Average (SMA) indicator

use signalbench_types::Bar;

use crate::series::{dense, rolling_mean};
use crate::traits::Indicator;

/// Simple Moving Average
///
/// Arithmetic mean of the last N close prices.
#[derive(Debug, Clone)]
pub struct SMA {
    /// Number of periods for the moving average
    pub period: usize,
}

impl SMA {
    /// Creates a new SMA indicator with the given period.
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for SMA {
    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        rolling_mean(&dense(bars.iter().map(|b| b.close)), self.period)
    }

    fn name(&self) -> &str {
        "SMA"
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }
}
