//! Warm-up reporting.

use serde::Serialize;
use signalbench_strategy::has_decision_inputs;
use signalbench_types::IndicatedBar;
use tracing::{info, warn};

/// How much of a series is spent waiting for the decision inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WarmupReport {
    /// Bars in the series
    pub total_bars: usize,
    /// Leading bars with at least one decision input missing
    pub warmup_bars: usize,
    /// Bars from the first one with all decision inputs available
    pub tradable_bars: usize,
    /// Leading bars the indicator settings imply, when the indicators were computed here
    pub expected_warmup: Option<usize>,
}

/// Measures and logs the warm-up of a series.
///
/// A series that never leaves warm-up is not an error; every bar simply holds.
#[must_use]
pub fn report_warmup(bars: &[IndicatedBar], expected_warmup: Option<usize>) -> WarmupReport {
    let warmup_bars = bars.iter().take_while(|bar| !has_decision_inputs(bar)).count();
    let report = WarmupReport {
        total_bars: bars.len(),
        warmup_bars,
        tradable_bars: bars.len() - warmup_bars,
        expected_warmup,
    };

    if report.tradable_bars == 0 {
        warn!(
            bars = report.total_bars,
            "decision inputs never become available, every bar holds"
        );
    } else {
        info!(
            "Warmup: {} bars held for missing indicators, {} of {} bars tradable",
            report.warmup_bars, report.tradable_bars, report.total_bars
        );
    }

    report
}
