//! Console rendering of a performance summary.

use std::fmt;

use crate::compute::PerformanceSummary;

const RULE: &str = "================================";

impl fmt::Display for PerformanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.overall;

        writeln!(f, "Portfolio Analysis Summary:")?;
        writeln!(f)?;
        writeln!(f, "Trading Start Date: {}", o.start_date)?;
        writeln!(f, "Trading End Date: {}", o.end_date)?;
        writeln!(f, "Total Trading Days: {} days", o.trading_days)?;
        writeln!(f, "Total Duration: {} months", o.total_months)?;
        writeln!(f, "Final Portfolio Value: ${:.2}", o.final_value)?;
        writeln!(f, "Total Profit: ${:.2}", o.total_profit)?;
        writeln!(f, "Total ROI: {}", percent(o.total_roi))?;
        writeln!(f, "Average Monthly ROI: {}", percent(o.avg_monthly_roi))?;
        writeln!(f, "Average Yearly ROI: {}", percent(o.avg_yearly_roi))?;
        writeln!(
            f,
            "Max Drawdown: {} (${:.2}, {} bars)",
            percent(o.max_drawdown),
            o.max_drawdown_abs,
            self.max_drawdown_bars
        )?;

        if let Some(t) = &self.trades {
            writeln!(
                f,
                "Trades: {} ({} wins, {} losses, win rate {})",
                t.total_trades,
                t.wins,
                t.losses,
                percent(t.win_rate)
            )?;
            writeln!(f, "Realized Profit: ${:.2}", t.realized_profit)?;
        }
        if let Some(s) = &self.signals {
            writeln!(
                f,
                "Signals: {} (BUY {}, SELL {}, HOLD {})",
                s.total(),
                s.buy,
                s.sell,
                s.hold
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Monthly Performance:")?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<8} {:>18} {:>15} {:>20}",
            "Month", "Monthly_End_Value", "Monthly_Income", "Monthly_Growth_Rate"
        )?;
        for m in &self.monthly {
            writeln!(
                f,
                "{:<8} {:>18.2} {:>15.2} {:>20.6}",
                m.month.to_string(),
                m.end_value,
                m.income,
                m.growth_rate
            )?;
        }
        Ok(())
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}
