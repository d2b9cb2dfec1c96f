//! Helpers for equity-curve derived metrics.

use serde::Serialize;
use signalbench_types::EquityPoint;

/// Worst peak-to-trough decline of an equity curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DrawdownStats {
    /// Maximum relative drawdown (0-1)
    pub max_drawdown: f64,
    /// Maximum absolute drawdown
    pub max_drawdown_abs: f64,
    /// Longest stretch of bars spent below a previous peak
    pub max_duration_bars: u64,
}

/// Computes maximum drawdown (relative, absolute) and duration in bars.
///
/// The first point is the initial peak.
#[must_use]
pub fn compute_drawdown(equity: &[EquityPoint]) -> DrawdownStats {
    let Some(first) = equity.first() else {
        return DrawdownStats::default();
    };

    let mut high_water = first.portfolio_value;
    let mut max_dd_rel: f64 = 0.0;
    let mut max_dd_abs: f64 = 0.0;
    let mut current_dd_start = 0usize;
    let mut max_dd_duration = 0usize;
    let mut in_drawdown = false;

    for (idx, point) in equity.iter().enumerate() {
        let value = point.portfolio_value;
        if value >= high_water {
            if in_drawdown {
                max_dd_duration = max_dd_duration.max(idx - current_dd_start);
                in_drawdown = false;
            }
            high_water = value;
        } else if high_water > 0.0 {
            if !in_drawdown {
                current_dd_start = idx;
                in_drawdown = true;
            }

            let dd_abs = high_water - value;
            max_dd_abs = max_dd_abs.max(dd_abs);
            max_dd_rel = max_dd_rel.max(dd_abs / high_water);
        }
    }

    if in_drawdown {
        max_dd_duration = max_dd_duration.max(equity.len() - current_dd_start);
    }

    DrawdownStats {
        max_drawdown: max_dd_rel.clamp(0.0, 1.0),
        max_drawdown_abs: max_dd_abs,
        max_duration_bars: u64::try_from(max_dd_duration).unwrap_or(u64::MAX),
    }
}
