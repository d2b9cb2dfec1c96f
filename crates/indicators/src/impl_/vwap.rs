//! Rolling Volume Weighted Average Price (VWAP)

use signalbench_types::Bar;

use crate::series::{dense, rolling_sum};
use crate::traits::Indicator;

/// Rolling VWAP over a trailing window of bars:
/// `sum(typical_price * volume) / sum(volume)`.
///
/// `None` until the window is full, and whenever the window's volume is zero.
#[derive(Debug, Clone)]
pub struct VWAP {
    /// Trailing window length
    pub window: usize,
}

impl VWAP {
    /// Creates a new VWAP indicator with the given window.
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl Indicator for VWAP {
    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let pv = rolling_sum(
            &dense(bars.iter().map(|b| b.typical_price() * b.volume)),
            self.window,
        );
        let volume = rolling_sum(&dense(bars.iter().map(|b| b.volume)), self.window);

        pv.into_iter()
            .zip(volume)
            .map(|(pv, vol)| match (pv, vol) {
                (Some(pv), Some(vol)) if vol > 0.0 => Some(pv / vol),
                _ => None,
            })
            .collect()
    }

    fn name(&self) -> &str {
        "VWAP"
    }

    fn warmup_periods(&self) -> usize {
        self.window
    }
}
