/// Which side of the fully-invested-or-fully-cash state machine a portfolio is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionState {
    /// Holding only cash
    FlatCash,
    /// Holding only shares
    FullyInvested,
}

/// Cash/shares snapshot of a single-asset portfolio.
///
/// After the first BUY exactly one of `cash > 0` and `shares > 0` holds.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PortfolioState {
    /// Uninvested cash
    pub cash: f64,
    /// Shares held
    pub shares: f64,
}

impl PortfolioState {
    /// All-cash starting state.
    #[must_use]
    pub fn with_cash(cash: f64) -> Self {
        Self { cash, shares: 0.0 }
    }

    /// Current side of the state machine.
    #[must_use]
    pub fn position(&self) -> PositionState {
        if self.shares > 0.0 {
            PositionState::FullyInvested
        } else {
            PositionState::FlatCash
        }
    }

    /// Portfolio value marked at `close`: cash when flat, otherwise shares * close.
    #[must_use]
    pub fn value_at(&self, close: f64) -> f64 {
        if self.cash > 0.0 {
            self.cash
        } else {
            self.shares * close
        }
    }
}
