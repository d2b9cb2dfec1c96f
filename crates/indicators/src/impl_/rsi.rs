//! Relative Strength Index (RSI) with Wilder smoothing

use signalbench_types::Bar;

use crate::series::ewm;
use crate::traits::Indicator;

/// Relative Strength Index
///
/// Gains and losses of close-to-close changes are smoothed with
/// `alpha = 1/period` (`adjust=False`, `min_periods=period`). The first bar's
/// change counts as zero. RSI is 100 when the average loss is zero.
#[derive(Debug, Clone)]
pub struct RSI {
    /// Smoothing period
    pub period: usize,
}

impl RSI {
    /// Creates a new RSI indicator with the given period.
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for RSI {
    #[allow(clippy::cast_precision_loss)]
    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        if self.period == 0 {
            return vec![None; bars.len()];
        }

        let diffs = bars.iter().enumerate().map(|(i, bar)| match i {
            0 => 0.0,
            _ => bar.close - bars[i - 1].close,
        });
        let (gains, losses): (Vec<_>, Vec<_>) = diffs
            .map(|d| (Some(d.max(0.0)), Some((-d).max(0.0))))
            .unzip();

        let alpha = 1.0 / self.period as f64;
        let avg_gain = ewm(&gains, alpha, self.period);
        let avg_loss = ewm(&losses, alpha, self.period);

        avg_gain
            .into_iter()
            .zip(avg_loss)
            .map(|(gain, loss)| match (gain, loss) {
                (Some(_), Some(l)) if l == 0.0 => Some(100.0),
                (Some(g), Some(l)) => Some(100.0 - 100.0 / (1.0 + g / l)),
                _ => None,
            })
            .collect()
    }

    fn name(&self) -> &str {
        "RSI"
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

    fn bars(closes: &[f64]) -> Vec<Bar> {
        closes.iter().copied().map(make_bar).collect()
    }

    #[test]
    fn test_rsi_rising_series_is_100() {
        let result = RSI::new(3).compute(&bars(&[1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert!(result[2..].iter().all(|v| *v == Some(100.0)));
    }

    #[test]
    fn test_rsi_falling_series_is_0() {
        let result = RSI::new(2).compute(&bars(&[5.0, 4.0, 3.0, 2.0]));
        assert_eq!(result[0], None);
        assert!(result[1..].iter().all(|v| v.unwrap().abs() < 1e-12));
    }

    #[test]
    fn test_rsi_wilder_values() {
        // diffs: 0, +2, -1; alpha = 1/2
        // gains: 0, 1, 0.5   losses: 0, 0, 0.5
        let result = RSI::new(2).compute(&bars(&[10.0, 12.0, 11.0]));
        assert_eq!(result[1], Some(100.0));
        assert!((result[2].unwrap() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_rsi_bounded() {
        let closes = [44.0, 44.3, 44.1, 43.6, 44.3, 44.8, 45.1, 45.4, 45.8, 46.1, 45.9, 46.2];
        let result = RSI::new(5).compute(&bars(&closes));
        for value in result.iter().flatten() {
            assert!((0.0..=100.0).contains(value));
        }
        assert_eq!(result.iter().filter(|v| v.is_some()).count(), closes.len() - 4);
    }
}
