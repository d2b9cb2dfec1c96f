//! Series primitives shared by the indicator implementations.
//!
//! Missing values are `None`. Recursive smoothers skip leading `None`s and
//! carry the previous value across interior gaps.

/// Exponentially weighted mean with `adjust = false` semantics:
/// `y[0] = x[0]`, `y[t] = alpha * x[t] + (1 - alpha) * y[t-1]`.
///
/// The first `min_periods - 1` observed values are masked to `None`.
#[must_use]
pub fn ewm(values: &[Option<f64>], alpha: f64, min_periods: usize) -> Vec<Option<f64>> {
    let mut result = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    let mut observed = 0usize;

    for value in values {
        if let Some(x) = *value {
            observed += 1;
            prev = Some(match prev {
                Some(p) => alpha * x + (1.0 - alpha) * p,
                None => x,
            });
        }
        result.push(if observed >= min_periods.max(1) { prev } else { None });
    }

    result
}

/// EMA smoothing factor for a span: `2 / (span + 1)`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn span_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Trailing sum over a full window; `None` while the window is not full or
/// contains a missing value.
#[must_use]
pub fn rolling_sum(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            values[i + 1 - window..=i]
                .iter()
                .try_fold(0.0, |acc, v| v.map(|x| acc + x))
        })
        .collect()
}

/// Trailing mean over a full window; `None` while the window is not full or
/// contains a missing value.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_sum(values, window)
        .into_iter()
        .map(|sum| sum.map(|s| s / window as f64))
        .collect()
}

/// Wraps a dense series.
#[must_use]
pub fn dense(values: impl IntoIterator<Item = f64>) -> Vec<Option<f64>> {
    values.into_iter().map(Some).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ewm_matches_recursive_definition() {
        let result = ewm(&dense([1.0, 2.0, 3.0, 4.0, 5.0]), 0.5, 1);
        let expected = [1.0, 1.5, 2.25, 3.125, 4.0625];
        for (r, e) in result.iter().zip(expected) {
            assert_relative_eq!(r.unwrap(), e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_ewm_masks_min_periods() {
        let result = ewm(&dense([1.0, 2.0, 3.0, 4.0]), 0.5, 3);
        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert_relative_eq!(result[2].unwrap(), 2.25, epsilon = 1e-12);
    }

    #[test]
    fn test_ewm_skips_leading_none() {
        let result = ewm(&[None, None, Some(4.0), Some(6.0)], 0.5, 2);
        assert!(result[..3].iter().all(Option::is_none));
        assert_relative_eq!(result[3].unwrap(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_mean_full_window_only() {
        let result = rolling_mean(&dense([1.0, 2.0, 3.0, 4.0]), 3);
        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert_relative_eq!(result[2].unwrap(), 2.0);
        assert_relative_eq!(result[3].unwrap(), 3.0);
    }

    #[test]
    fn test_rolling_mean_none_in_window() {
        let result = rolling_mean(&[Some(1.0), None, Some(3.0), Some(5.0)], 2);
        assert_eq!(result[1], None);
        assert_eq!(result[2], None);
        assert_relative_eq!(result[3].unwrap(), 4.0);
    }

    #[test]
    fn test_zero_window_is_all_none() {
        assert!(rolling_sum(&dense([1.0, 2.0]), 0).iter().all(Option::is_none));
    }

    #[test]
    fn test_span_alpha() {
        assert_relative_eq!(span_alpha(9), 0.2);
    }
}
