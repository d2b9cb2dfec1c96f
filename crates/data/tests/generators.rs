use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use signalbench_types::{Bar, IndicatedBar};

/// Valid oldest-first bar sequences with one-minute spacing.
pub fn valid_bar_sequence(len: usize) -> impl Strategy<Value = Vec<IndicatedBar>> {
    prop::collection::vec(valid_bar(), len..=len).prop_map(|mut bars| {
        let mut ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        for bar in &mut bars {
            bar.bar.timestamp = ts;
            ts += Duration::minutes(1);
        }
        bars
    })
}

fn valid_bar() -> impl Strategy<Value = IndicatedBar> {
    (
        50.0f64..500.0, // base price
        0.01..2.0,      // half range
        0.0..10_000.0,  // volume
    )
        .prop_map(|(base, spread, volume)| {
            IndicatedBar::bare(Bar {
                timestamp: NaiveDate::MIN.and_hms_opt(0, 0, 0).unwrap(),
                open: base,
                high: base + spread,
                low: base - spread,
                close: base + spread * 0.5,
                volume,
            })
        })
}
