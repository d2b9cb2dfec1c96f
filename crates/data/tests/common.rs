use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use signalbench_types::{Bar, IndicatedBar};

pub fn ts(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn sample_bars() -> Vec<IndicatedBar> {
    vec![
        IndicatedBar::bare(Bar {
            timestamp: ts(2, 9, 30),
            open: 100.0,
            high: 101.0,
            low: 99.5,
            close: 100.5,
            volume: 1000.0,
        }),
        IndicatedBar::bare(Bar {
            timestamp: ts(2, 9, 31),
            open: 100.5,
            high: 101.25,
            low: 100.0,
            close: 101.0,
            volume: 1200.0,
        }),
    ]
}

pub fn write_text(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

/// Newest-first table in the layout of the historical indicator exports.
pub const INDICATOR_EXPORT: &str = "\
timestamp,open,high,low,close,volume,MACD_line,MACD_signal,MACD_histogram,RSI_14,ATR_14,VWAP
1/3/2024 9:31,101,102,100.5,101.5,900,0.31,0.2,0.11,38.5,1.2,101.1
1/3/2024 9:30,100.5,101.2,100.1,101,800,0.25,0.18,0.07,35.1,1.1,100.9
1/2/2024 15:59,100,101,99.5,100.5,1000,,,,,,100.3
";
