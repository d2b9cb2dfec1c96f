//! Bar-by-bar portfolio simulation.

use serde::Serialize;
use signalbench_portfolio::Portfolio;
use signalbench_types::{Decision, EquityPoint, IndicatedBar, LedgerRow, PortfolioState, Trade};
use tracing::{debug, info};

use crate::error::BacktestError;

/// Everything a simulation produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    /// One row per bar
    pub ledger: Vec<LedgerRow>,
    /// One equity point per bar
    pub equity_curve: Vec<EquityPoint>,
    /// Completed round trips
    pub trades: Vec<Trade>,
    /// Portfolio state after the last bar
    pub final_state: PortfolioState,
    /// Executed transactions (buys and sells)
    pub transactions: usize,
}

impl SimulationOutcome {
    /// Value of the last equity point, `None` for an empty run.
    #[must_use]
    pub fn final_value(&self) -> Option<f64> {
        self.equity_curve.last().map(|p| p.portfolio_value)
    }
}

/// Folds decisions over bars in order, all-in on BUY and all-out on SELL at
/// each bar's close.
///
/// `bars[i]` is paired with `decisions[i]`. Every bar emits exactly one
/// ledger row and one equity point.
///
/// # Errors
/// - [`BacktestError::LengthMismatch`] when the slices differ in length.
/// - [`BacktestError::Portfolio`] for invalid cash or an untradeable close.
pub fn simulate(
    bars: &[IndicatedBar],
    decisions: &[Decision],
    initial_cash: f64,
) -> Result<SimulationOutcome, BacktestError> {
    if bars.len() != decisions.len() {
        return Err(BacktestError::LengthMismatch {
            bars: bars.len(),
            decisions: decisions.len(),
        });
    }

    let mut portfolio = Portfolio::new(initial_cash)?;
    let mut ledger = Vec::with_capacity(bars.len());

    for (row, (bar, decision)) in bars.iter().zip(decisions).enumerate() {
        if let Some(fill) = portfolio.apply(row, bar, decision)? {
            debug!(row, ?fill, "fill");
        }
        let portfolio_value = portfolio.mark(bar)?;
        ledger.push(LedgerRow {
            bar: *bar,
            decision: decision.clone(),
            state: portfolio.state(),
            portfolio_value,
        });
    }

    let transactions = portfolio.transaction_count();
    let (final_state, trades, equity_curve) = portfolio.into_parts();

    info!(
        bars = ledger.len(),
        transactions,
        round_trips = trades.len(),
        final_value = equity_curve.last().map_or(initial_cash, |p| p.portfolio_value),
        "simulation finished"
    );

    Ok(SimulationOutcome {
        ledger,
        equity_curve,
        trades,
        final_state,
        transactions,
    })
}

/// Equity curve for `(bar, decision)` pairs.
///
/// # Errors
/// Any error of [`simulate`].
pub fn run(
    pairs: &[(IndicatedBar, Decision)],
    initial_cash: f64,
) -> Result<Vec<EquityPoint>, BacktestError> {
    let (bars, decisions): (Vec<IndicatedBar>, Vec<Decision>) = pairs.iter().cloned().unzip();
    Ok(simulate(&bars, &decisions, initial_cash)?.equity_curve)
}
