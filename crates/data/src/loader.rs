use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use signalbench_types::{Bar, IndicatedBar, default_timestamp_formats};
use tracing::{debug, warn};

use crate::columns::{ColumnMap, IndicatorColumn};
use crate::error::DataError;
use crate::validation::validate_bars;

/// Parsing options for bar tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Accepted timestamp formats, tried in order
    pub timestamp_formats: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timestamp_formats: default_timestamp_formats(),
        }
    }
}

impl LoadOptions {
    /// Options accepting the given timestamp formats.
    #[must_use]
    pub fn with_formats(timestamp_formats: Vec<String>) -> Self {
        Self { timestamp_formats }
    }
}

/// A loaded bar table, oldest bar first.
#[derive(Debug, Clone, PartialEq)]
pub struct BarTable {
    /// Bars in chronological order
    pub bars: Vec<IndicatedBar>,
    /// Which optional columns the input carried
    pub columns: ColumnMap,
    /// True when the file was newest-first and has been reversed
    pub reversed: bool,
}

impl BarTable {
    /// True when the input carries every column the threshold generator reads.
    #[must_use]
    pub fn has_decision_inputs(&self) -> bool {
        self.columns.has_decision_inputs()
    }

    /// Puts rows produced oldest-first back into the row order of the input file.
    #[must_use]
    pub fn to_file_order<T>(&self, mut rows: Vec<T>) -> Vec<T> {
        if self.reversed {
            rows.reverse();
        }
        rows
    }
}

/// Loads and validates a bar table from a CSV file.
///
/// # Errors
/// - [`DataError::FileNotFound`] when the file cannot be opened.
/// - Any error of [`read_bar_table`].
pub fn load_bar_table(path: &Path, options: &LoadOptions) -> Result<BarTable, DataError> {
    let file = File::open(path)
        .map_err(|e| DataError::FileNotFound(path.display().to_string(), e.to_string()))?;
    let table = read_bar_table(file, options)?;
    debug!(
        path = %path.display(),
        bars = table.bars.len(),
        reversed = table.reversed,
        "loaded bar table"
    );
    Ok(table)
}

/// Parses a bar table from any reader.
///
/// Rows are reversed when the first timestamp is later than the last one, then
/// validated with [`validate_bars`].
///
/// # Errors
/// - [`DataError::MissingColumn`] for an absent OHLCV header.
/// - [`DataError::InvalidNumber`] / [`DataError::InvalidTimestamp`] for unparseable cells.
/// - [`DataError::EmptyData`] when the table has no rows.
/// - [`DataError::CorruptData`] when validation fails.
pub fn read_bar_table<R: Read>(reader: R, options: &LoadOptions) -> Result<BarTable, DataError> {
    if options.timestamp_formats.is_empty() {
        return Err(DataError::CorruptData(
            "no timestamp formats configured".to_string(),
        ));
    }

    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let columns = ColumnMap::resolve(&headers)?;

    let mut bars = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        bars.push(parse_row(&record, row, &headers, &columns, options)?);
    }

    if bars.is_empty() {
        return Err(DataError::EmptyData);
    }

    let reversed = match (bars.first(), bars.last()) {
        (Some(first), Some(last)) => first.timestamp() > last.timestamp(),
        _ => false,
    };
    if reversed {
        warn!(rows = bars.len(), "input is newest-first, reversing");
        bars.reverse();
    }

    validate_bars(&bars)?;

    Ok(BarTable {
        bars,
        columns,
        reversed,
    })
}

/// Parses a timestamp with the first matching format.
///
/// # Errors
/// [`DataError::InvalidTimestamp`] when no format matches.
pub fn parse_timestamp(
    value: &str,
    row: usize,
    formats: &[String],
) -> Result<NaiveDateTime, DataError> {
    formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| DataError::InvalidTimestamp {
            row,
            value: value.to_string(),
            formats: formats.join(", "),
        })
}

fn parse_row(
    record: &StringRecord,
    row: usize,
    headers: &StringRecord,
    columns: &ColumnMap,
    options: &LoadOptions,
) -> Result<IndicatedBar, DataError> {
    let [ts_idx, open_idx, high_idx, low_idx, close_idx, volume_idx] = columns.ohlcv;
    let cell = |idx: usize| record.get(idx).unwrap_or("");
    let number = |idx: usize| parse_number(cell(idx), row, header_name(headers, idx));

    let bar = Bar {
        timestamp: parse_timestamp(cell(ts_idx), row, &options.timestamp_formats)?,
        open: number(open_idx)?,
        high: number(high_idx)?,
        low: number(low_idx)?,
        close: number(close_idx)?,
        volume: number(volume_idx)?,
    };

    let indicator = |column: IndicatorColumn| match columns.indicator(column) {
        Some(idx) => parse_optional(cell(idx), row, header_name(headers, idx)),
        None => Ok(None),
    };

    Ok(IndicatedBar {
        bar,
        macd_line: indicator(IndicatorColumn::MacdLine)?,
        macd_signal: indicator(IndicatorColumn::MacdSignal)?,
        macd_histogram: indicator(IndicatorColumn::MacdHistogram)?,
        rsi: indicator(IndicatorColumn::Rsi)?,
        atr: indicator(IndicatorColumn::Atr)?,
        atr_mean: indicator(IndicatorColumn::AtrMean)?,
        vwap: indicator(IndicatorColumn::Vwap)?,
        sma: indicator(IndicatorColumn::Sma)?,
        ema: indicator(IndicatorColumn::Ema)?,
    })
}

fn header_name(headers: &StringRecord, idx: usize) -> &str {
    headers.get(idx).unwrap_or("?")
}

fn parse_number(value: &str, row: usize, column: &str) -> Result<f64, DataError> {
    value.parse::<f64>().map_err(|_| DataError::InvalidNumber {
        column: column.to_string(),
        row,
        value: value.to_string(),
    })
}

/// Empty and `NaN` cells mean "not available"; anything else must be a finite number.
fn parse_optional(value: &str, row: usize, column: &str) -> Result<Option<f64>, DataError> {
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let parsed = parse_number(value, row, column)?;
    if parsed.is_finite() {
        Ok(Some(parsed))
    } else {
        Err(DataError::InvalidNumber {
            column: column.to_string(),
            row,
            value: value.to_string(),
        })
    }
}
