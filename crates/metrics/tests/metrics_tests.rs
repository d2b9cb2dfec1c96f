//! Property tests for the performance summary.

use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use signalbench_metrics::summarize;
use signalbench_types::EquityPoint;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 11, 27)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

/// Equity curve with one point every `step_hours`, spanning several months.
fn curve(values: &[f64], step_hours: i64) -> Vec<EquityPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| EquityPoint {
            timestamp: start() + Duration::hours(step_hours * i64::try_from(i).unwrap()),
            portfolio_value: v,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_monthly_income_sums_to_total_profit(
        values in prop::collection::vec(0.0f64..50_000.0, 1..200),
        step_hours in 1i64..72,
        initial_cash in 0.0f64..50_000.0,
    ) {
        let equity = curve(&values, step_hours);
        let summary = summarize(&equity, initial_cash).unwrap();

        let income: f64 = summary.monthly.iter().map(|m| m.income).sum();
        let expected = values[values.len() - 1] - initial_cash;
        prop_assert!((income - expected).abs() < 1e-6);
        prop_assert!((summary.overall.total_profit - expected).abs() < 1e-9);
    }

    #[test]
    fn prop_month_rows_are_ordered_and_distinct(
        values in prop::collection::vec(1.0f64..1_000.0, 1..200),
        step_hours in 1i64..72,
    ) {
        let summary = summarize(&curve(&values, step_hours), 100.0).unwrap();
        prop_assert!(summary.monthly.windows(2).all(|w| w[0].month < w[1].month));
        prop_assert!(summary.monthly.len() <= summary.overall.total_months as usize);
    }

    #[test]
    fn prop_drawdown_is_a_fraction(values in prop::collection::vec(0.0f64..10_000.0, 1..100)) {
        let summary = summarize(&curve(&values, 1), 1.0).unwrap();
        prop_assert!((0.0..=1.0).contains(&summary.overall.max_drawdown));
        prop_assert!(summary.overall.max_drawdown_abs >= 0.0);
    }
}

#[test]
fn test_zero_initial_cash_never_faults() {
    let summary = summarize(&curve(&[0.0, 0.0, 0.0], 24), 0.0).unwrap();
    assert_relative_eq!(summary.overall.total_roi, 0.0);
    assert_relative_eq!(summary.overall.avg_monthly_roi, 0.0);
    assert!(summary.monthly.iter().all(|m| m.growth_rate == 0.0));
}

#[test]
fn test_summary_serializes() {
    let summary = summarize(&curve(&[100.0, 110.0], 24), 100.0).unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["monthly"][0]["month"], "2023-11");
    assert_eq!(json["overall"]["trading_days"], 2);
}
