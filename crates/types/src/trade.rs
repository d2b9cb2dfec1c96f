use chrono::NaiveDateTime;

/// Completed round trip (one BUY followed by one SELL)
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Trade {
    /// Transaction index of the buy (buys and sells share one counter starting at 0)
    pub buy_transaction: usize,
    /// Transaction index of the sell
    pub sell_transaction: usize,
    /// Buy bar timestamp
    pub buy_time: NaiveDateTime,
    /// Sell bar timestamp
    pub sell_time: NaiveDateTime,
    /// Close price at the buy
    pub buy_price: f64,
    /// Close price at the sell
    pub sell_price: f64,
    /// Shares bought and later sold
    pub shares: f64,
    /// Cash spent on the buy
    pub cost_basis: f64,
    /// Cash received on the sell
    pub proceeds: f64,
    /// Realized profit (`proceeds - cost_basis`)
    pub profit: f64,
    /// Return on the trade (`profit / cost_basis`, 0 when the cost basis is 0)
    pub roi: f64,
}

impl Trade {
    /// True when the trade realized a positive profit.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.profit > 0.0
    }
}
