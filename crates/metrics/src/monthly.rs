//! Calendar aggregation of an equity curve.

use std::collections::{BTreeMap, HashSet};

use signalbench_types::{EquityPoint, MonthlySummary, YearMonth};

/// Number of distinct calendar dates in the curve.
#[must_use]
pub fn trading_days(equity: &[EquityPoint]) -> usize {
    equity
        .iter()
        .map(|point| point.timestamp.date())
        .collect::<HashSet<_>>()
        .len()
}

/// Inclusive month span between the first and last point, 0 for an empty curve.
#[must_use]
pub fn total_months(equity: &[EquityPoint]) -> u32 {
    match (equity.first(), equity.last()) {
        (Some(first), Some(last)) => {
            YearMonth::of(first.timestamp).months_through(YearMonth::of(last.timestamp))
        }
        _ => 0,
    }
}

/// One row per calendar month present in the curve, oldest first.
///
/// The month-end value is the last point of the month. Income is measured
/// against the previous month-end, or `initial_cash` for the first month, so
/// the incomes sum to `final_value - initial_cash`.
#[must_use]
pub fn monthly_summary(equity: &[EquityPoint], initial_cash: f64) -> Vec<MonthlySummary> {
    let month_ends: BTreeMap<YearMonth, f64> = equity
        .iter()
        .map(|point| (YearMonth::of(point.timestamp), point.portfolio_value))
        .collect();

    let mut previous = initial_cash;
    month_ends
        .into_iter()
        .map(|(month, end_value)| {
            let income = end_value - previous;
            let growth_rate = if previous == 0.0 { 0.0 } else { income / previous };
            previous = end_value;
            MonthlySummary {
                month,
                end_value,
                income,
                growth_rate,
            }
        })
        .collect()
}
