use chrono::{NaiveDate, NaiveDateTime};

use crate::bar::IndicatedBar;
use crate::calendar::YearMonth;
use crate::position::PortfolioState;
use crate::signal::Decision;

/// Point in the equity curve
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EquityPoint {
    /// Bar timestamp
    pub timestamp: NaiveDateTime,
    /// Portfolio value at the bar's close
    pub portfolio_value: f64,
}

/// One row of the per-bar simulation output
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LedgerRow {
    /// Bar with its indicator snapshot
    pub bar: IndicatedBar,
    /// Decision taken on the bar
    pub decision: Decision,
    /// Portfolio state after the bar was processed
    pub state: PortfolioState,
    /// Portfolio value at the bar's close
    pub portfolio_value: f64,
}

/// Per-month performance row
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct MonthlySummary {
    /// Calendar month
    pub month: YearMonth,
    /// Value of the last equity point in the month
    pub end_value: f64,
    /// `end_value` minus the previous month's end value (initial cash for the first month)
    pub income: f64,
    /// `income` divided by the previous month's end value, 0 when that is 0
    pub growth_rate: f64,
}

/// Statistics over completed trades
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct TradeStats {
    /// Number of completed round trips
    pub total_trades: u64,
    /// Trades with positive profit
    pub wins: u64,
    /// Trades with zero or negative profit
    pub losses: u64,
    /// `wins / total_trades`, 0 without trades
    pub win_rate: f64,
    /// Sum of realized profit
    pub realized_profit: f64,
    /// Mean per-trade ROI, 0 without trades
    pub avg_trade_roi: f64,
    /// Largest single-trade profit
    pub largest_win: f64,
    /// Largest single-trade loss (most negative profit)
    pub largest_loss: f64,
}

/// Whole-run performance statistics
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct OverallStats {
    /// Calendar date of the first equity point
    pub start_date: NaiveDate,
    /// Calendar date of the last equity point
    pub end_date: NaiveDate,
    /// Distinct calendar dates in the curve
    pub trading_days: usize,
    /// Inclusive calendar-month span of the curve
    pub total_months: u32,
    /// Cash the run started with
    pub initial_cash: f64,
    /// Value of the last equity point
    pub final_value: f64,
    /// `final_value - initial_cash`
    pub total_profit: f64,
    /// `total_profit / initial_cash`, 0 when the initial cash is 0
    pub total_roi: f64,
    /// `total_roi / total_months` (not compounded)
    pub avg_monthly_roi: f64,
    /// `avg_monthly_roi * 12` (not compounded)
    pub avg_yearly_roi: f64,
    /// Maximum relative drawdown (0-1)
    pub max_drawdown: f64,
    /// Maximum absolute drawdown
    pub max_drawdown_abs: f64,
}

/// BUY/SELL/HOLD totals for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct SignalCounts {
    /// BUY decisions
    pub buy: usize,
    /// SELL decisions
    pub sell: usize,
    /// HOLD decisions
    pub hold: usize,
}

impl SignalCounts {
    /// Total decisions counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.buy + self.sell + self.hold
    }
}
