//! Running generators over a whole series.

use signalbench_types::{Action, Bar, Decision, IndicatedBar, SignalCounts};
use tracing::{debug, info};

use crate::error::StrategyError;
use crate::impl_::engulfing::{EngulfingDetector, EngulfingPattern};
use crate::traits::SignalGenerator;
use crate::trend::{PatternPrecision, TrendLabel, label_trends, pattern_precision};

/// Decisions for a series plus their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRun {
    /// One decision per bar, in bar order
    pub decisions: Vec<Decision>,
    /// BUY/SELL/HOLD totals
    pub counts: SignalCounts,
    /// Leading bars held because a decision input was still missing
    pub warmup_bars: usize,
}

/// True when every input of the threshold generator is available on the bar.
#[must_use]
pub fn has_decision_inputs(bar: &IndicatedBar) -> bool {
    bar.macd_histogram.is_some() && bar.rsi.is_some() && bar.atr.is_some() && bar.atr_mean.is_some()
}

/// Runs a generator over every bar.
pub fn generate_decisions(generator: &dyn SignalGenerator, bars: &[IndicatedBar]) -> SignalRun {
    let decisions: Vec<Decision> = bars.iter().map(|bar| generator.decide(bar)).collect();

    let counts = decisions
        .iter()
        .fold(SignalCounts::default(), |mut counts, d| {
            match d.action {
                Action::Buy => counts.buy += 1,
                Action::Sell => counts.sell += 1,
                Action::Hold => counts.hold += 1,
            }
            counts
        });
    let warmup_bars = bars.iter().take_while(|b| !has_decision_inputs(b)).count();

    debug!(
        generator = generator.name(),
        bars = bars.len(),
        buy = counts.buy,
        sell = counts.sell,
        hold = counts.hold,
        warmup_bars,
        "generated decisions"
    );

    SignalRun {
        decisions,
        counts,
        warmup_bars,
    }
}

/// Engulfing patterns, trend labels and per-pattern precision for a series.
#[derive(Debug, Clone, PartialEq)]
pub struct EngulfingStudy {
    /// Pattern per bar
    pub patterns: Vec<EngulfingPattern>,
    /// Forward trend label per bar (`None` near the end of the series)
    pub labels: Vec<Option<TrendLabel>>,
    /// Precision of code 1 against downtrends
    pub bullish: PatternPrecision,
    /// Precision of code 2 against uptrends
    pub bearish: PatternPrecision,
}

impl EngulfingStudy {
    /// Pattern codes per bar.
    #[must_use]
    pub fn signal_codes(&self) -> Vec<u8> {
        self.patterns.iter().map(|p| p.code()).collect()
    }

    /// Trend codes per bar.
    #[must_use]
    pub fn trend_codes(&self) -> Vec<Option<u8>> {
        self.labels.iter().map(|l| l.map(TrendLabel::code)).collect()
    }
}

/// Detects patterns, labels trends and scores both pattern codes.
///
/// # Errors
/// [`StrategyError::InvalidParams`] for invalid labeling parameters.
pub fn study_engulfing(
    bars: &[Bar],
    detector: &EngulfingDetector,
    horizon: usize,
    pip_threshold: f64,
) -> Result<EngulfingStudy, StrategyError> {
    let patterns = detector.detect(bars);
    let labels = label_trends(bars, horizon, pip_threshold)?;
    let bullish = pattern_precision(&patterns, &labels, EngulfingPattern::Bullish)?;
    let bearish = pattern_precision(&patterns, &labels, EngulfingPattern::Bearish)?;

    info!(%bullish, "engulfing precision");
    info!(%bearish, "engulfing precision");

    Ok(EngulfingStudy {
        patterns,
        labels,
        bullish,
        bearish,
    })
}
