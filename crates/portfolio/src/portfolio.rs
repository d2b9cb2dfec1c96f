//! Single-asset portfolio for backtesting.
//!
//! The portfolio is always either fully in cash or fully invested. BUY moves
//! all cash into shares at the bar's close, SELL moves all shares back.

use chrono::NaiveDateTime;
use signalbench_types::{
    Action, Decision, EquityPoint, IndicatedBar, PortfolioState, PositionState, Trade,
};
use tracing::{debug, info};

use crate::error::PortfolioError;

/// Executed transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    /// All cash converted to shares
    Buy {
        /// Transaction index
        transaction: usize,
        /// Shares bought
        shares: f64,
        /// Cash spent
        cost: f64,
    },
    /// All shares converted to cash, closing a round trip
    Sell(Trade),
}

/// Entry side of the open round trip.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OpenLot {
    transaction: usize,
    time: NaiveDateTime,
    price: f64,
    shares: f64,
    cost_basis: f64,
}

/// Portfolio state for backtesting.
///
/// Manages:
/// - Cash and shares
/// - Cost basis of the open position
/// - Completed round trips
/// - One equity point per marked bar
#[derive(Debug)]
pub struct Portfolio {
    state: PortfolioState,
    open_lot: Option<OpenLot>,
    next_transaction: usize,
    closed_trades: Vec<Trade>,
    equity_curve: Vec<EquityPoint>,
}

impl Portfolio {
    /// Creates an all-cash portfolio.
    ///
    /// # Errors
    /// [`PortfolioError::InvalidInitialCash`] when `initial_cash` is negative or not finite.
    pub fn new(initial_cash: f64) -> Result<Self, PortfolioError> {
        if !initial_cash.is_finite() || initial_cash < 0.0 {
            return Err(PortfolioError::InvalidInitialCash(initial_cash));
        }
        Ok(Self {
            state: PortfolioState::with_cash(initial_cash),
            open_lot: None,
            next_transaction: 0,
            closed_trades: Vec::new(),
            equity_curve: Vec::new(),
        })
    }

    /// Applies a decision at the bar's close.
    ///
    /// BUY executes only while holding cash, SELL only while holding shares;
    /// anything else leaves the state unchanged and returns `None`.
    ///
    /// # Errors
    /// [`PortfolioError::InvalidPrice`] when a transaction would execute at a
    /// non-positive or non-finite close.
    pub fn apply(
        &mut self,
        row: usize,
        bar: &IndicatedBar,
        decision: &Decision,
    ) -> Result<Option<Fill>, PortfolioError> {
        match decision.action {
            Action::Buy if self.state.cash > 0.0 => self.buy(row, bar, decision).map(Some),
            Action::Sell if self.state.shares > 0.0 => self.sell(row, bar, decision).map(Some),
            _ => Ok(None),
        }
    }

    /// Marks the portfolio at the bar's close and records the equity point.
    ///
    /// # Errors
    /// [`PortfolioError::NonFiniteValue`] when the resulting value is not finite.
    pub fn mark(&mut self, bar: &IndicatedBar) -> Result<f64, PortfolioError> {
        let value = self.state.value_at(bar.close());
        if !value.is_finite() {
            return Err(PortfolioError::NonFiniteValue {
                field: "portfolio_value".to_string(),
                value,
            });
        }
        self.equity_curve.push(EquityPoint {
            timestamp: bar.timestamp(),
            portfolio_value: value,
        });
        Ok(value)
    }

    fn buy(
        &mut self,
        row: usize,
        bar: &IndicatedBar,
        decision: &Decision,
    ) -> Result<Fill, PortfolioError> {
        let close = checked_close(row, bar)?;
        let transaction = self.take_transaction();
        log_transaction(transaction, row, bar, decision, &self.state);

        let cost = self.state.cash;
        let shares = cost / close;
        self.state = PortfolioState { cash: 0.0, shares };
        self.open_lot = Some(OpenLot {
            transaction,
            time: bar.timestamp(),
            price: close,
            shares,
            cost_basis: cost,
        });

        info!(shares, cost, "bought");
        Ok(Fill::Buy {
            transaction,
            shares,
            cost,
        })
    }

    fn sell(
        &mut self,
        row: usize,
        bar: &IndicatedBar,
        decision: &Decision,
    ) -> Result<Fill, PortfolioError> {
        let close = checked_close(row, bar)?;
        let transaction = self.take_transaction();
        log_transaction(transaction, row, bar, decision, &self.state);

        let shares = self.state.shares;
        let proceeds = shares * close;
        // Shares only come from a buy, so the lot is always present here.
        let lot = self.open_lot.take().unwrap_or(OpenLot {
            transaction,
            time: bar.timestamp(),
            price: close,
            shares,
            cost_basis: 0.0,
        });
        let profit = proceeds - lot.cost_basis;
        let roi = if lot.cost_basis == 0.0 {
            0.0
        } else {
            profit / lot.cost_basis
        };

        self.state = PortfolioState {
            cash: proceeds,
            shares: 0.0,
        };

        let trade = Trade {
            buy_transaction: lot.transaction,
            sell_transaction: transaction,
            buy_time: lot.time,
            sell_time: bar.timestamp(),
            buy_price: lot.price,
            sell_price: close,
            shares: lot.shares,
            cost_basis: lot.cost_basis,
            proceeds,
            profit,
            roi,
        };
        info!(
            proceeds,
            profit,
            roi_pct = roi * 100.0,
            cash = proceeds,
            "sold all shares"
        );
        self.closed_trades.push(trade.clone());
        Ok(Fill::Sell(trade))
    }

    fn take_transaction(&mut self) -> usize {
        let index = self.next_transaction;
        self.next_transaction += 1;
        index
    }

    /// Current cash/shares snapshot.
    #[must_use]
    pub fn state(&self) -> PortfolioState {
        self.state
    }

    /// Current side of the state machine.
    #[must_use]
    pub fn position(&self) -> PositionState {
        self.state.position()
    }

    /// Cost basis of the open position, `None` when flat.
    #[must_use]
    pub fn cost_basis(&self) -> Option<f64> {
        self.open_lot.map(|lot| lot.cost_basis)
    }

    /// Number of transactions executed so far (buys and sells).
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.next_transaction
    }

    /// Completed round trips.
    #[must_use]
    pub fn closed_trades(&self) -> &[Trade] {
        &self.closed_trades
    }

    /// Equity points recorded by [`Portfolio::mark`], oldest first.
    #[must_use]
    pub fn equity_curve(&self) -> &[EquityPoint] {
        &self.equity_curve
    }

    /// Consumes the portfolio into its final state, trades and equity curve.
    #[must_use]
    pub fn into_parts(self) -> (PortfolioState, Vec<Trade>, Vec<EquityPoint>) {
        (self.state, self.closed_trades, self.equity_curve)
    }
}

fn checked_close(row: usize, bar: &IndicatedBar) -> Result<f64, PortfolioError> {
    let close = bar.close();
    if close.is_finite() && close > 0.0 {
        Ok(close)
    } else {
        Err(PortfolioError::InvalidPrice { row, close })
    }
}

fn log_transaction(
    transaction: usize,
    row: usize,
    bar: &IndicatedBar,
    decision: &Decision,
    before: &PortfolioState,
) {
    info!(
        transaction,
        row,
        time = %bar.timestamp(),
        close = bar.close(),
        signal = %decision.action,
        reason = %decision.reason,
        cash = before.cash,
        shares = before.shares,
        "executing transaction"
    );
    debug!(?before, "state before transaction");
}
