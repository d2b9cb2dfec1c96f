use std::fs;

use approx::assert_relative_eq;
use tempfile::tempdir;

use signalbench_data::{
    DataError, IndicatorColumn, LoadOptions, load_bar_table, read_bar_table, validate_bars,
    write_indicator_table, write_ledger, write_monthly, write_pattern_table, write_trades,
};
use signalbench_types::{
    Decision, DEFAULT_TIMESTAMP_FORMAT, LedgerRow, MonthlySummary, PortfolioState, Trade,
    YearMonth,
};

mod common;
use common::{INDICATOR_EXPORT, sample_bars, ts, write_text};
mod generators;
use proptest::prelude::*;

#[test]
fn test_load_indicator_export() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("TSLA_with_indicators.csv");
    write_text(&path, INDICATOR_EXPORT);

    let table = load_bar_table(&path, &LoadOptions::default()).unwrap();

    assert!(table.reversed);
    assert_eq!(table.bars.len(), 3);
    assert_eq!(table.bars[0].timestamp(), ts(2, 15, 59));
    assert_eq!(table.bars[0].macd_histogram, None);
    assert_eq!(table.bars[2].macd_histogram, Some(0.11));
    assert_eq!(table.bars[2].vwap, Some(101.1));
    assert!(table.has_decision_inputs());
    assert!(!table.columns.has(IndicatorColumn::AtrMean));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let err = load_bar_table(&dir.path().join("nope.csv"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, DataError::FileNotFound(_, _)));
}

#[test]
fn test_out_of_order_rows_rejected() {
    let csv = "\
timestamp,open,high,low,close,volume
1/2/2024 9:30,1,1,1,1,0
1/2/2024 9:32,1,1,1,1,0
1/2/2024 9:31,1,1,1,1,0
";
    let err = read_bar_table(csv.as_bytes(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, DataError::CorruptData(_)));
}

#[test]
fn test_nan_price_rejected() {
    let csv = "timestamp,open,high,low,close,volume\n1/2/2024 9:30,NaN,1,1,1,0\n";
    let err = read_bar_table(csv.as_bytes(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, DataError::CorruptData(_)));
}

#[test]
fn test_ledger_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    let bars = sample_bars();
    let rows = vec![
        LedgerRow {
            bar: bars[0],
            decision: Decision::hold("Hold: insufficient warm-up data (MACD_hist, RSI)"),
            state: PortfolioState::with_cash(10_000.0),
            portfolio_value: 10_000.0,
        },
        LedgerRow {
            bar: bars[1],
            decision: Decision::buy("Buy: test"),
            state: PortfolioState {
                cash: 0.0,
                shares: 99.5,
            },
            portfolio_value: 10_000.0,
        },
    ];

    write_ledger(&path, &rows, DEFAULT_TIMESTAMP_FORMAT).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "timestamp,open,high,low,close,volume,MACD_line,MACD_signal,MACD_histogram,RSI_14,ATR_14,ATR_mean,VWAP,Signal,Reason,Cash,Shares,Portfolio_Value"
    );
    assert!(lines[1].starts_with("01/02/2024 09:30,100,101,99.5,100.5,1000,,,,,,,,HOLD,"));
    assert!(lines[2].contains(",BUY,Buy: test,0,99.5,10000"));
}

#[test]
fn test_monthly_and_trades_layout() {
    let dir = tempdir().unwrap();
    let monthly = dir.path().join("monthly.csv");
    let trades = dir.path().join("trades.csv");

    write_monthly(
        &monthly,
        &[MonthlySummary {
            month: YearMonth::new(2024, 1),
            end_value: 10_250.0,
            income: 250.0,
            growth_rate: 0.025,
        }],
    )
    .unwrap();
    let text = fs::read_to_string(&monthly).unwrap();
    assert_eq!(
        text,
        "Month,Monthly_End_Value,Monthly_Income,Monthly_Growth_Rate\n2024-01,10250,250,0.025\n"
    );

    write_trades(
        &trades,
        &[Trade {
            buy_transaction: 0,
            sell_transaction: 1,
            buy_time: ts(2, 9, 31),
            sell_time: ts(3, 10, 0),
            buy_price: 100.0,
            sell_price: 110.0,
            shares: 100.0,
            cost_basis: 10_000.0,
            proceeds: 11_000.0,
            profit: 1_000.0,
            roi: 0.1,
        }],
        DEFAULT_TIMESTAMP_FORMAT,
    )
    .unwrap();
    let text = fs::read_to_string(&trades).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1],
        "0,1,01/02/2024 09:31,01/03/2024 10:00,100,110,100,10000,11000,1000,0.1"
    );
}

#[test]
fn test_indicator_table_rounds_and_reloads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("with_indicators.csv");
    let mut bars = sample_bars();
    bars[1].rsi = Some(55.5555);
    bars[1].atr = Some(0.98765);

    write_indicator_table(&path, &bars, DEFAULT_TIMESTAMP_FORMAT, 2).unwrap();
    let table = load_bar_table(&path, &LoadOptions::default()).unwrap();

    assert_eq!(table.bars.len(), 2);
    assert_eq!(table.bars[0].rsi, None);
    assert_relative_eq!(table.bars[1].rsi.unwrap(), 55.56);
    assert_relative_eq!(table.bars[1].atr.unwrap(), 0.99);
    assert!(table.columns.has(IndicatorColumn::Ema));
}

#[test]
fn test_pattern_table_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("patterns.csv");
    let bars: Vec<_> = sample_bars().into_iter().map(|b| b.bar).collect();

    write_pattern_table(&path, &bars, &[0, 1], &[Some(1), None], DEFAULT_TIMESTAMP_FORMAT).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "timestamp,open,high,low,close,volume,Signal,Trend");
    assert!(lines[1].ends_with(",0,1"));
    assert!(lines[2].ends_with(",1,"));

    let err = write_pattern_table(&path, &bars, &[0], &[None, None], DEFAULT_TIMESTAMP_FORMAT)
        .unwrap_err();
    assert!(matches!(err, DataError::LengthMismatch { .. }));
}

proptest! {
    #[test]
    fn prop_generated_sequences_validate(bars in generators::valid_bar_sequence(30)) {
        prop_assert!(validate_bars(&bars).is_ok());
    }

    #[test]
    fn prop_reversed_file_loads_oldest_first(bars in generators::valid_bar_sequence(12)) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bars.csv");
        let mut newest_first = bars.clone();
        newest_first.reverse();
        write_indicator_table(&path, &newest_first, "%Y-%m-%d %H:%M:%S", 6).unwrap();

        let table = load_bar_table(&path, &LoadOptions::default()).unwrap();
        prop_assert!(table.reversed);
        prop_assert_eq!(table.bars.len(), bars.len());
        for (loaded, original) in table.bars.iter().zip(&bars) {
            prop_assert_eq!(loaded.timestamp(), original.timestamp());
        }
    }
}
