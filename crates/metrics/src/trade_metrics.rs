//! Helpers for trade-derived metrics.

use signalbench_types::{Trade, TradeStats};

/// Aggregates completed round trips.
///
/// A trade with zero profit counts as a loss.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Trade counts never exceed f64 mantissa precision
pub fn trade_stats(trades: &[Trade]) -> TradeStats {
    if trades.is_empty() {
        return TradeStats::default();
    }

    let total = trades.len();
    let wins = trades.iter().filter(|t| t.is_win()).count();
    let realized_profit: f64 = trades.iter().map(|t| t.profit).sum();
    let avg_trade_roi = trades.iter().map(|t| t.roi).sum::<f64>() / total as f64;

    let (largest_win, largest_loss) =
        trades
            .iter()
            .fold((0.0_f64, 0.0_f64), |(best, worst), trade| {
                (best.max(trade.profit), worst.min(trade.profit))
            });

    TradeStats {
        total_trades: usize_to_u64(total),
        wins: usize_to_u64(wins),
        losses: usize_to_u64(total - wins),
        win_rate: wins as f64 / total as f64,
        realized_profit,
        avg_trade_roi,
        largest_win,
        largest_loss,
    }
}

fn usize_to_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDateTime;

    fn trade(cost: f64, proceeds: f64) -> Trade {
        let profit = proceeds - cost;
        Trade {
            buy_transaction: 0,
            sell_transaction: 1,
            buy_time: NaiveDateTime::default(),
            sell_time: NaiveDateTime::default(),
            buy_price: 1.0,
            sell_price: 1.0,
            shares: cost,
            cost_basis: cost,
            proceeds,
            profit,
            roi: profit / cost,
        }
    }

    #[test]
    fn test_no_trades() {
        assert_eq!(trade_stats(&[]), TradeStats::default());
    }

    #[test]
    fn test_mixed_trades() {
        let trades = [trade(100.0, 110.0), trade(110.0, 99.0), trade(99.0, 99.0)];
        let stats = trade_stats(&trades);

        assert_eq!(stats.total_trades, 3);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 2);
        assert_relative_eq!(stats.win_rate, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(stats.realized_profit, -1.0, epsilon = 1e-9);
        assert_relative_eq!(stats.largest_win, 10.0, epsilon = 1e-9);
        assert_relative_eq!(stats.largest_loss, -11.0, epsilon = 1e-9);
        assert_relative_eq!(stats.avg_trade_roi, (0.1 - 0.1) / 3.0, epsilon = 1e-12);
    }
}
