//! Indicator threshold strategy
//!
//! BUY when the MACD histogram, RSI and ATR expansion all clear their entry
//! thresholds; SELL when the histogram turns negative while RSI is overbought.
//! BUY is evaluated first, then SELL, else HOLD.

use signalbench_types::{Decision, IndicatedBar, Policy, Thresholds};

use crate::error::StrategyError;
use crate::traits::SignalGenerator;

/// Decision inputs of one bar, all available.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Snapshot {
    histogram: f64,
    rsi: f64,
    atr: f64,
    atr_mean: f64,
}

impl Snapshot {
    /// Extracts the inputs, or the names of the missing ones.
    fn of(bar: &IndicatedBar) -> Result<Self, Vec<&'static str>> {
        match (bar.macd_histogram, bar.rsi, bar.atr, bar.atr_mean) {
            (Some(histogram), Some(rsi), Some(atr), Some(atr_mean)) => Ok(Self {
                histogram,
                rsi,
                atr,
                atr_mean,
            }),
            (histogram, rsi, atr, atr_mean) => Err([
                ("MACD_hist", histogram.is_none()),
                ("RSI", rsi.is_none()),
                ("ATR_14", atr.is_none()),
                ("ATR_mean", atr_mean.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect()),
        }
    }
}

/// Threshold generator parameterized by a [`Policy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdStrategy {
    policy: Policy,
    thresholds: Thresholds,
}

impl ThresholdStrategy {
    /// Creates a generator for the given policy.
    ///
    /// # Errors
    /// [`StrategyError::InvalidParams`] when a custom threshold is not finite.
    pub fn new(policy: Policy) -> Result<Self, StrategyError> {
        let thresholds = policy.thresholds();
        if !thresholds.is_finite() {
            return Err(StrategyError::InvalidParams(format!(
                "{} policy thresholds must be finite: {thresholds:?}",
                policy.name()
            )));
        }
        Ok(Self { policy, thresholds })
    }

    /// Conservative preset.
    #[must_use]
    pub fn conservative() -> Self {
        Self {
            policy: Policy::Conservative,
            thresholds: Thresholds::CONSERVATIVE,
        }
    }

    /// Aggressive preset.
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            policy: Policy::Aggressive,
            thresholds: Thresholds::AGGRESSIVE,
        }
    }

    /// Policy this generator was built from.
    #[must_use]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Active threshold set.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    fn is_buy(&self, s: &Snapshot) -> bool {
        let t = &self.thresholds;
        s.histogram > t.buy_histogram_above
            && s.rsi < t.buy_rsi_below
            && s.atr > t.buy_atr_ratio * s.atr_mean
    }

    fn is_sell(&self, s: &Snapshot) -> bool {
        let t = &self.thresholds;
        s.histogram < t.sell_histogram_below && s.rsi > t.sell_rsi_above
    }
}

impl SignalGenerator for ThresholdStrategy {
    fn decide(&self, bar: &IndicatedBar) -> Decision {
        let s = match Snapshot::of(bar) {
            Ok(s) => s,
            Err(missing) => {
                return Decision::hold(format!(
                    "Hold: insufficient warm-up data (missing {})",
                    missing.join(", ")
                ));
            }
        };
        let t = &self.thresholds;

        if self.is_buy(&s) {
            Decision::buy(format!(
                "Buy: MACD_hist={:.2} > {}, RSI={:.2} < {}, ATR_14={:.2} > {}*ATR_mean={:.2}",
                s.histogram,
                t.buy_histogram_above,
                s.rsi,
                t.buy_rsi_below,
                s.atr,
                t.buy_atr_ratio,
                t.buy_atr_ratio * s.atr_mean
            ))
        } else if self.is_sell(&s) {
            Decision::sell(format!(
                "Sell: MACD_hist={:.2} < {}, RSI={:.2} > {}",
                s.histogram, t.sell_histogram_below, s.rsi, t.sell_rsi_above
            ))
        } else {
            Decision::hold(format!(
                "Hold: MACD_hist={:.2}, RSI={:.2}, ATR_14={:.2}, ATR_mean={:.2}",
                s.histogram, s.rsi, s.atr, s.atr_mean
            ))
        }
    }

    fn name(&self) -> &str {
        self.policy.name()
    }
}
