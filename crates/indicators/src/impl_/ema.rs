//! Exponential Moving Average (EMA) indicator

use signalbench_types::Bar;

use crate::series::{dense, ewm, span_alpha};
use crate::traits::Indicator;

/// Exponential Moving Average of close
///
/// Matches pandas `ewm(span=period, adjust=False, min_periods=period).mean()`.
/// The recursion starts at the first bar; only the output is masked until
/// `period` bars have been seen.
#[derive(Debug, Clone)]
pub struct EMA {
    /// Number of periods for the EMA
    pub period: usize,
}

impl EMA {
    /// Creates a new EMA indicator with the given period.
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// EMA over an arbitrary series with the same semantics as [`Indicator::compute`].
    #[must_use]
    pub fn compute_series(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        if self.period == 0 {
            return vec![None; values.len()];
        }
        ewm(values, span_alpha(self.period), self.period)
    }
}

impl Indicator for EMA {
    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        self.compute_series(&dense(bars.iter().map(|b| b.close)))
    }

    fn name(&self) -> &str {
        "EMA"
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn make_bar(close: f64) -> Bar {
        Bar {
            timestamp: NaiveDateTime::default(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }

    #[test]
    fn test_ema_basic() {
        let bars: Vec<Bar> = vec![1.0, 2.0, 3.0, 4.0, 5.0]
            .into_iter()
            .map(make_bar)
            .collect();

        let result = EMA::new(3).compute(&bars);

        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert!((result[2].unwrap() - 2.25).abs() < 1e-10);
        assert!((result[3].unwrap() - 3.125).abs() < 1e-10);
        assert!((result[4].unwrap() - 4.0625).abs() < 1e-10);
    }

    #[test]
    fn test_ema_converges_to_constant() {
        let bars: Vec<Bar> = vec![5.0; 20].into_iter().map(make_bar).collect();

        let result = EMA::new(5).compute(&bars);

        for (i, value) in result.iter().enumerate().skip(4) {
            assert!(
                (value.unwrap() - 5.0).abs() < 1e-10,
                "EMA[{i}] = {value:?} != 5.0"
            );
        }
    }

    #[test]
    fn test_ema_insufficient_data() {
        let bars: Vec<Bar> = vec![1.0, 2.0].into_iter().map(make_bar).collect();

        let result = EMA::new(5).compute(&bars);

        assert_eq!(result.len(), bars.len());
        assert!(result.iter().all(Option::is_none));
    }

    #[test]
    fn test_ema_period_one_matches_close() {
        let bars: Vec<Bar> = vec![1.0, 2.0, 3.5, 2.5]
            .into_iter()
            .map(make_bar)
            .collect();

        let result = EMA::new(1).compute(&bars);

        for (bar, value) in bars.iter().zip(result.iter()) {
            assert!((value.unwrap() - bar.close).abs() < 1e-10);
        }
    }

    #[test]
    fn test_ema_period_zero_returns_none() {
        let bars: Vec<Bar> = vec![1.0, 2.0, 3.0].into_iter().map(make_bar).collect();
        assert!(EMA::new(0).compute(&bars).iter().all(Option::is_none));
    }
}
