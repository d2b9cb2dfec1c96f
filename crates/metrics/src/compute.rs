//! Performance summary entrypoint.

use serde::Serialize;
use signalbench_types::{EquityPoint, MonthlySummary, OverallStats, SignalCounts, Trade, TradeStats};
use tracing::debug;

use crate::equity_metrics::compute_drawdown;
use crate::error::MetricsError;
use crate::monthly::{monthly_summary, total_months, trading_days};
use crate::trade_metrics::trade_stats;

/// Whole-run and per-month performance of a backtest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    /// Whole-run statistics
    pub overall: OverallStats,
    /// One row per calendar month
    pub monthly: Vec<MonthlySummary>,
    /// Longest stretch of bars below a previous equity peak
    pub max_drawdown_bars: u64,
    /// Completed round trips, when supplied
    pub trades: Option<TradeStats>,
    /// Decision totals, when supplied
    pub signals: Option<SignalCounts>,
}

impl PerformanceSummary {
    /// Attaches statistics over the completed trades.
    #[must_use]
    pub fn with_trades(mut self, trades: &[Trade]) -> Self {
        self.trades = Some(trade_stats(trades));
        self
    }

    /// Attaches the run's decision totals.
    #[must_use]
    pub fn with_signal_counts(mut self, counts: SignalCounts) -> Self {
        self.signals = Some(counts);
        self
    }
}

/// Summarizes an oldest-first equity curve.
///
/// ROI figures are simple, not compounded: the average monthly ROI is the
/// total ROI divided by the inclusive month span, the yearly one twelve times
/// that. Every ratio with a zero denominator is 0.
///
/// # Errors
/// - [`MetricsError::EmptyEquityCurve`] when `equity` is empty.
/// - [`MetricsError::InvalidInitialCash`] when `initial_cash` is negative or not finite.
pub fn summarize(
    equity: &[EquityPoint],
    initial_cash: f64,
) -> Result<PerformanceSummary, MetricsError> {
    if !initial_cash.is_finite() || initial_cash < 0.0 {
        return Err(MetricsError::InvalidInitialCash(initial_cash));
    }
    let (Some(first), Some(last)) = (equity.first(), equity.last()) else {
        return Err(MetricsError::EmptyEquityCurve);
    };

    let months = total_months(equity);
    let final_value = last.portfolio_value;
    let total_profit = final_value - initial_cash;
    let total_roi = if initial_cash == 0.0 {
        0.0
    } else {
        total_profit / initial_cash
    };
    let avg_monthly_roi = if months == 0 {
        0.0
    } else {
        total_roi / f64::from(months)
    };
    let drawdown = compute_drawdown(equity);

    let overall = OverallStats {
        start_date: first.timestamp.date(),
        end_date: last.timestamp.date(),
        trading_days: trading_days(equity),
        total_months: months,
        initial_cash,
        final_value,
        total_profit,
        total_roi,
        avg_monthly_roi,
        avg_yearly_roi: avg_monthly_roi * 12.0,
        max_drawdown: drawdown.max_drawdown,
        max_drawdown_abs: drawdown.max_drawdown_abs,
    };
    let monthly = monthly_summary(equity, initial_cash);

    debug!(
        points = equity.len(),
        months = monthly.len(),
        total_roi,
        max_drawdown = drawdown.max_drawdown,
        "summarized equity curve"
    );

    Ok(PerformanceSummary {
        overall,
        monthly,
        max_drawdown_bars: drawdown.max_duration_bars,
        trades: None,
        signals: None,
    })
}
