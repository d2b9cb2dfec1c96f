//! Forward-looking trend labels and pattern precision.
//!
//! Labels look ahead in time and are only meant for evaluating patterns
//! after the fact.

use std::fmt;

use signalbench_types::Bar;

use crate::error::StrategyError;
use crate::impl_::engulfing::EngulfingPattern;

/// Default excursion threshold beyond the current bar's body.
pub const DEFAULT_PIP_THRESHOLD: f64 = 300e-5;

/// Default look-ahead horizon in bars.
pub const DEFAULT_HORIZON: usize = 3;

/// Outcome of scanning the bars after a given bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendLabel {
    /// No future bar moved beyond the threshold (code 0)
    NoClearTrend,
    /// Price fell below the body by more than the threshold (code 1)
    Downtrend,
    /// Price rose above the body by more than the threshold (code 2)
    Uptrend,
    /// A future bar crossed the threshold on both sides (code 3)
    NoTrend,
}

impl TrendLabel {
    /// Numeric code used in output tables.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            TrendLabel::NoClearTrend => 0,
            TrendLabel::Downtrend => 1,
            TrendLabel::Uptrend => 2,
            TrendLabel::NoTrend => 3,
        }
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendLabel::NoClearTrend => "no clear trend",
            TrendLabel::Downtrend => "downtrend",
            TrendLabel::Uptrend => "uptrend",
            TrendLabel::NoTrend => "no trend",
        };
        f.write_str(label)
    }
}

/// Labels bar `bar_index` by scanning the next `horizon` bars.
///
/// With `top`/`bottom` the current bar's body edges, each future bar is
/// checked in order:
/// - both `high - top` and `bottom - low` exceed the threshold: `NoTrend`, keep scanning
/// - `bottom - low` exceeds it: `Downtrend`, stop
/// - `high - top` exceeds it: `Uptrend`, stop
/// - otherwise `NoClearTrend`, keep scanning
///
/// The last assigned label wins. Returns `Ok(None)` when the bar lacks a full
/// horizon (`bar_index >= len - 1 - horizon`).
///
/// # Errors
/// - [`StrategyError::IndexOutOfRange`] when `bar_index >= bars.len()`.
/// - [`StrategyError::InvalidParams`] for a zero horizon or a negative or
///   non-finite threshold.
pub fn classify_future_trend(
    bars: &[Bar],
    bar_index: usize,
    horizon: usize,
    pip_threshold: f64,
) -> Result<Option<TrendLabel>, StrategyError> {
    check_params(horizon, pip_threshold)?;
    if bar_index >= bars.len() {
        return Err(StrategyError::IndexOutOfRange {
            index: bar_index,
            len: bars.len(),
        });
    }
    Ok(label_at(bars, bar_index, horizon, pip_threshold))
}

/// Labels every bar; bars without a full horizon get `None`.
///
/// # Errors
/// [`StrategyError::InvalidParams`] for a zero horizon or a negative or
/// non-finite threshold.
pub fn label_trends(
    bars: &[Bar],
    horizon: usize,
    pip_threshold: f64,
) -> Result<Vec<Option<TrendLabel>>, StrategyError> {
    check_params(horizon, pip_threshold)?;
    Ok((0..bars.len())
        .map(|i| label_at(bars, i, horizon, pip_threshold))
        .collect())
}

fn check_params(horizon: usize, pip_threshold: f64) -> Result<(), StrategyError> {
    if horizon == 0 {
        return Err(StrategyError::InvalidParams(
            "horizon must be at least 1".to_string(),
        ));
    }
    if !pip_threshold.is_finite() || pip_threshold < 0.0 {
        return Err(StrategyError::InvalidParams(format!(
            "pip_threshold must be finite and non-negative, got {pip_threshold}"
        )));
    }
    Ok(())
}

fn label_at(bars: &[Bar], bar_index: usize, horizon: usize, threshold: f64) -> Option<TrendLabel> {
    if bar_index + 1 + horizon >= bars.len() {
        return None;
    }

    let current = &bars[bar_index];
    let top = current.body_top();
    let bottom = current.body_bottom();
    let mut label = TrendLabel::NoClearTrend;

    for future in &bars[bar_index + 1..=bar_index + horizon] {
        let above = future.high - top > threshold;
        let below = bottom - future.low > threshold;
        if above && below {
            label = TrendLabel::NoTrend;
        } else if below {
            label = TrendLabel::Downtrend;
            break;
        } else if above {
            label = TrendLabel::Uptrend;
            break;
        } else {
            label = TrendLabel::NoClearTrend;
        }
    }

    Some(label)
}

/// Precision of one pattern code against the trend labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternPrecision {
    /// Pattern evaluated
    pub pattern: EngulfingPattern,
    /// Bars carrying the pattern
    pub flagged: usize,
    /// Flagged bars whose trend code equals the pattern code
    pub hits: usize,
    /// Flagged bars whose trend code differs (including unlabeled bars)
    pub false_positives: usize,
    /// `hits / flagged`, `None` when nothing was flagged
    pub precision: Option<f64>,
}

impl fmt::Display for PatternPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            Some(p) => write!(
                f,
                "pattern {} ({}): precision {:.4} ({} of {} flagged, {} false positives)",
                self.pattern.code(),
                self.pattern,
                p,
                self.hits,
                self.flagged,
                self.false_positives
            ),
            None => write!(
                f,
                "pattern {} ({}): no bars flagged",
                self.pattern.code(),
                self.pattern
            ),
        }
    }
}

/// Fraction of bars flagged with `pattern` whose trend label has the same code.
///
/// # Errors
/// [`StrategyError::InvalidParams`] when the two series differ in length.
pub fn pattern_precision(
    patterns: &[EngulfingPattern],
    labels: &[Option<TrendLabel>],
    pattern: EngulfingPattern,
) -> Result<PatternPrecision, StrategyError> {
    if patterns.len() != labels.len() {
        return Err(StrategyError::InvalidParams(format!(
            "{} patterns but {} trend labels",
            patterns.len(),
            labels.len()
        )));
    }

    let (flagged, hits) = patterns
        .iter()
        .zip(labels)
        .filter(|(p, _)| **p == pattern)
        .fold((0usize, 0usize), |(flagged, hits), (_, label)| {
            let hit = label.is_some_and(|l| l.code() == pattern.code());
            (flagged + 1, hits + usize::from(hit))
        });

    #[allow(clippy::cast_precision_loss)]
    let precision = (flagged > 0).then(|| hits as f64 / flagged as f64);

    Ok(PatternPrecision {
        pattern,
        flagged,
        hits,
        false_positives: flagged - hits,
        precision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            timestamp: NaiveDateTime::default(),
            open,
            high,
            low,
            close,
            volume: 0.0,
        }
    }

    fn flat(price: f64) -> Bar {
        bar(price, price, price, price)
    }

    #[test]
    fn test_uptrend_stops_scan() {
        let bars = vec![
            bar(10.0, 10.0, 10.0, 10.0),
            bar(10.0, 10.01, 10.0, 10.0), // high - top = 0.01 > 0.003
            bar(10.0, 10.0, 9.9, 10.0),   // would be a downtrend, never reached
            flat(10.0),
            flat(10.0),
        ];
        assert_eq!(
            classify_future_trend(&bars, 0, 3, DEFAULT_PIP_THRESHOLD).unwrap(),
            Some(TrendLabel::Uptrend)
        );
    }

    #[test]
    fn test_both_sides_keeps_scanning() {
        let bars = vec![
            flat(10.0),
            bar(10.0, 10.01, 9.99, 10.0), // both sides: NoTrend, continue
            flat(10.0),                    // nothing: NoClearTrend overwrites
            bar(10.0, 10.0, 9.99, 10.0),   // downtrend, stop
            flat(10.0),
        ];
        assert_eq!(
            classify_future_trend(&bars, 0, 3, DEFAULT_PIP_THRESHOLD).unwrap(),
            Some(TrendLabel::Downtrend)
        );

        let bars = vec![
            flat(10.0),
            flat(10.0),
            flat(10.0),
            bar(10.0, 10.01, 9.99, 10.0), // last label is NoTrend
            flat(10.0),
        ];
        assert_eq!(
            classify_future_trend(&bars, 0, 3, DEFAULT_PIP_THRESHOLD).unwrap(),
            Some(TrendLabel::NoTrend)
        );
    }

    #[test]
    fn test_tail_bars_unlabeled() {
        let bars: Vec<Bar> = (0..6).map(|i| flat(10.0 + f64::from(i))).collect();
        let labels = label_trends(&bars, 3, DEFAULT_PIP_THRESHOLD).unwrap();
        // len - 1 - horizon = 2: bars 0 and 1 are labeled
        assert!(labels[..2].iter().all(Option::is_some));
        assert!(labels[2..].iter().all(Option::is_none));
        assert_eq!(labels[0], Some(TrendLabel::Uptrend));
    }

    #[test]
    fn test_short_series_has_no_labels() {
        let bars: Vec<Bar> = (0..3).map(|_| flat(1.0)).collect();
        let labels = label_trends(&bars, 3, DEFAULT_PIP_THRESHOLD).unwrap();
        assert!(labels.iter().all(Option::is_none));
    }

    #[test]
    fn test_index_out_of_range() {
        let bars = vec![flat(1.0)];
        assert!(matches!(
            classify_future_trend(&bars, 1, 3, DEFAULT_PIP_THRESHOLD),
            Err(StrategyError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_invalid_params() {
        let bars = vec![flat(1.0)];
        assert!(label_trends(&bars, 0, DEFAULT_PIP_THRESHOLD).is_err());
        assert!(label_trends(&bars, 3, f64::NAN).is_err());
    }

    #[test]
    fn test_precision_counts() {
        use EngulfingPattern::{Bearish, Bullish, None as NoPattern};
        let patterns = [NoPattern, Bullish, Bullish, Bearish, Bullish];
        let labels = [
            Some(TrendLabel::Uptrend),
            Some(TrendLabel::Downtrend),
            Some(TrendLabel::Uptrend),
            Some(TrendLabel::Uptrend),
            None,
        ];

        let bullish = pattern_precision(&patterns, &labels, Bullish).unwrap();
        assert_eq!(bullish.flagged, 3);
        assert_eq!(bullish.hits, 1);
        assert_eq!(bullish.false_positives, 2);
        assert!((bullish.precision.unwrap() - 1.0 / 3.0).abs() < 1e-12);

        let bearish = pattern_precision(&patterns, &labels, Bearish).unwrap();
        assert_eq!(bearish.precision, Some(1.0));
    }

    #[test]
    fn test_precision_none_when_unflagged() {
        let result = pattern_precision(
            &[EngulfingPattern::None],
            &[Some(TrendLabel::Uptrend)],
            EngulfingPattern::Bearish,
        )
        .unwrap();
        assert_eq!(result.precision, None);
        assert!(result.to_string().contains("no bars flagged"));
    }

    #[test]
    fn test_precision_length_mismatch() {
        assert!(
            pattern_precision(&[EngulfingPattern::None], &[], EngulfingPattern::Bullish).is_err()
        );
    }
}
