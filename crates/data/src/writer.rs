//! CSV writers for the output tables.
//!
//! Every writer emits a header row in a fixed column order. Unavailable
//! indicator values are written as empty cells.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use signalbench_types::{Bar, IndicatedBar, LedgerRow, MonthlySummary, Trade};

use crate::columns::IndicatorColumn;
use crate::error::DataError;

/// Header of the per-bar simulation table.
pub const LEDGER_HEADER: [&str; 18] = [
    "timestamp",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "MACD_line",
    "MACD_signal",
    "MACD_histogram",
    "RSI_14",
    "ATR_14",
    "ATR_mean",
    "VWAP",
    "Signal",
    "Reason",
    "Cash",
    "Shares",
    "Portfolio_Value",
];

/// Header of the monthly summary table.
pub const MONTHLY_HEADER: [&str; 4] = [
    "Month",
    "Monthly_End_Value",
    "Monthly_Income",
    "Monthly_Growth_Rate",
];

/// Header of the completed-trades table.
pub const TRADES_HEADER: [&str; 11] = [
    "Transaction_Buy",
    "Transaction_Sell",
    "Buy_Time",
    "Sell_Time",
    "Buy_Price",
    "Sell_Price",
    "Shares",
    "Cost_Basis",
    "Proceeds",
    "Profit",
    "ROI",
];

const OHLCV_HEADER: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

/// Rounds half away from zero to `decimals` places.
#[allow(clippy::cast_possible_wrap)] // decimals is always small
#[must_use]
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Writes the per-bar simulation table.
///
/// # Errors
/// [`DataError::Csv`] on any write failure.
pub fn write_ledger(
    path: &Path,
    rows: &[LedgerRow],
    timestamp_format: &str,
) -> Result<(), DataError> {
    let mut writer = create(path)?;
    writer.write_record(LEDGER_HEADER)?;

    for row in rows {
        let ib = &row.bar;
        let mut record = ohlcv_cells(&ib.bar, timestamp_format, None);
        record.extend(
            [
                ib.macd_line,
                ib.macd_signal,
                ib.macd_histogram,
                ib.rsi,
                ib.atr,
                ib.atr_mean,
                ib.vwap,
            ]
            .into_iter()
            .map(|v| optional_cell(v, None)),
        );
        record.push(row.decision.action.to_string());
        record.push(row.decision.reason.clone());
        record.push(row.state.cash.to_string());
        record.push(row.state.shares.to_string());
        record.push(row.portfolio_value.to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the monthly summary table.
///
/// # Errors
/// [`DataError::Csv`] on any write failure.
pub fn write_monthly(path: &Path, months: &[MonthlySummary]) -> Result<(), DataError> {
    let mut writer = create(path)?;
    writer.write_record(MONTHLY_HEADER)?;
    for m in months {
        writer.write_record([
            m.month.to_string(),
            m.end_value.to_string(),
            m.income.to_string(),
            m.growth_rate.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the completed-trades table.
///
/// # Errors
/// [`DataError::Csv`] on any write failure.
pub fn write_trades(
    path: &Path,
    trades: &[Trade],
    timestamp_format: &str,
) -> Result<(), DataError> {
    let mut writer = create(path)?;
    writer.write_record(TRADES_HEADER)?;
    for t in trades {
        writer.write_record([
            t.buy_transaction.to_string(),
            t.sell_transaction.to_string(),
            t.buy_time.format(timestamp_format).to_string(),
            t.sell_time.format(timestamp_format).to_string(),
            t.buy_price.to_string(),
            t.sell_price.to_string(),
            t.shares.to_string(),
            t.cost_basis.to_string(),
            t.proceeds.to_string(),
            t.profit.to_string(),
            t.roi.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes OHLCV plus every indicator column, rounding all numbers to `decimals`.
/// Rows are written in the order given.
///
/// # Errors
/// [`DataError::Csv`] on any write failure.
pub fn write_indicator_table(
    path: &Path,
    bars: &[IndicatedBar],
    timestamp_format: &str,
    decimals: u32,
) -> Result<(), DataError> {
    let mut writer = create(path)?;
    let header: Vec<&str> = OHLCV_HEADER
        .iter()
        .copied()
        .chain(IndicatorColumn::ALL.iter().map(|c| c.header()))
        .collect();
    writer.write_record(&header)?;

    for ib in bars {
        let mut record = ohlcv_cells(&ib.bar, timestamp_format, Some(decimals));
        record.extend(
            [
                ib.macd_line,
                ib.macd_signal,
                ib.macd_histogram,
                ib.rsi,
                ib.atr,
                ib.atr_mean,
                ib.vwap,
                ib.sma,
                ib.ema,
            ]
            .into_iter()
            .map(|v| optional_cell(v, Some(decimals))),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes bars with their engulfing `Signal` code and forward `Trend` label.
///
/// # Errors
/// - [`DataError::LengthMismatch`] when `signals` or `trends` differ in length from `bars`.
/// - [`DataError::Csv`] on any write failure.
pub fn write_pattern_table(
    path: &Path,
    bars: &[Bar],
    signals: &[u8],
    trends: &[Option<u8>],
    timestamp_format: &str,
) -> Result<(), DataError> {
    check_len("signals", bars.len(), signals.len())?;
    check_len("trends", bars.len(), trends.len())?;

    let mut writer = create(path)?;
    let header: Vec<&str> = OHLCV_HEADER
        .iter()
        .copied()
        .chain(["Signal", "Trend"])
        .collect();
    writer.write_record(&header)?;

    for ((bar, signal), trend) in bars.iter().zip(signals).zip(trends) {
        let mut record = ohlcv_cells(bar, timestamp_format, None);
        record.push(signal.to_string());
        record.push(trend.map(|t| t.to_string()).unwrap_or_default());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<Writer<File>, DataError> {
    Ok(Writer::from_path(path)?)
}

fn check_len(what: &str, expected: usize, actual: usize) -> Result<(), DataError> {
    if expected == actual {
        Ok(())
    } else {
        Err(DataError::LengthMismatch {
            what: what.to_string(),
            expected,
            actual,
        })
    }
}

fn number_cell(value: f64, decimals: Option<u32>) -> String {
    match decimals {
        Some(d) => round_to_decimals(value, d).to_string(),
        None => value.to_string(),
    }
}

fn optional_cell(value: Option<f64>, decimals: Option<u32>) -> String {
    value.map(|v| number_cell(v, decimals)).unwrap_or_default()
}

fn ohlcv_cells(bar: &Bar, timestamp_format: &str, decimals: Option<u32>) -> Vec<String> {
    vec![
        bar.timestamp.format(timestamp_format).to_string(),
        number_cell(bar.open, decimals),
        number_cell(bar.high, decimals),
        number_cell(bar.low, decimals),
        number_cell(bar.close, decimals),
        number_cell(bar.volume, decimals),
    ]
}
