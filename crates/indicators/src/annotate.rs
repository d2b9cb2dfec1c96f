//! Attaching indicator columns to a bar series.

use signalbench_types::{Bar, IndicatedBar, IndicatorSettings};
use tracing::debug;

use crate::error::IndicatorError;
use crate::impl_::{atr::ATR, ema::EMA, macd::MACD, rsi::RSI, sma::SMA, vwap::VWAP};
use crate::series::rolling_mean;
use crate::traits::{Indicator, MultiOutputIndicator};

/// Validates indicator settings.
///
/// # Errors
/// - [`IndicatorError::ZeroPeriod`] when any period or window is zero.
/// - [`IndicatorError::InvalidParams`] when `macd_fast >= macd_slow`.
pub fn validate_settings(settings: &IndicatorSettings) -> Result<(), IndicatorError> {
    let periods = [
        ("macd_fast", settings.macd_fast),
        ("macd_slow", settings.macd_slow),
        ("macd_signal", settings.macd_signal),
        ("rsi_period", settings.rsi_period),
        ("atr_period", settings.atr_period),
        ("atr_mean_window", settings.atr_mean_window),
        ("vwap_window", settings.vwap_window),
        ("sma_period", settings.sma_period),
        ("ema_period", settings.ema_period),
    ];
    if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
        return Err(IndicatorError::ZeroPeriod(name));
    }
    if settings.macd_fast >= settings.macd_slow {
        return Err(IndicatorError::invalid_params(format!(
            "macd_fast ({}) must be smaller than macd_slow ({})",
            settings.macd_fast, settings.macd_slow
        )));
    }
    Ok(())
}

/// Bars needed before every decision input (histogram, RSI, ATR, ATR mean)
/// is available.
#[must_use]
pub fn decision_warmup_bars(settings: &IndicatorSettings) -> usize {
    let macd = MACD::new(settings.macd_fast, settings.macd_slow, settings.macd_signal);
    let atr_mean = settings.atr_period + settings.atr_mean_window - 1;
    macd.warmup_periods()
        .max(RSI::new(settings.rsi_period).warmup_periods())
        .max(atr_mean)
}

/// Computes every indicator column for an oldest-first bar series.
///
/// # Errors
/// Any error of [`validate_settings`].
pub fn annotate(
    bars: &[Bar],
    settings: &IndicatorSettings,
) -> Result<Vec<IndicatedBar>, IndicatorError> {
    validate_settings(settings)?;

    let macd = MACD::new(settings.macd_fast, settings.macd_slow, settings.macd_signal)
        .compute_all(bars);
    let rsi = RSI::new(settings.rsi_period).compute(bars);
    let atr = ATR::new(settings.atr_period).compute(bars);
    let atr_mean = rolling_mean(&atr, settings.atr_mean_window);
    let vwap = VWAP::new(settings.vwap_window).compute(bars);
    let sma = SMA::new(settings.sma_period).compute(bars);
    let ema = EMA::new(settings.ema_period).compute(bars);

    debug!(
        bars = bars.len(),
        warmup = decision_warmup_bars(settings),
        "computed indicators"
    );

    Ok(bars
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatedBar {
            bar: *bar,
            macd_line: macd.line[i],
            macd_signal: macd.signal[i],
            macd_histogram: macd.histogram[i],
            rsi: rsi[i],
            atr: atr[i],
            atr_mean: atr_mean[i],
            vwap: vwap[i],
            sma: sma[i],
            ema: ema[i],
        })
        .collect())
}

/// Recomputes `atr_mean` as the rolling mean of the bars' `atr` field.
///
/// Used when an input table carries ATR but no ATR mean column.
///
/// # Errors
/// [`IndicatorError::ZeroPeriod`] when `window` is zero.
pub fn fill_atr_mean(bars: &mut [IndicatedBar], window: usize) -> Result<(), IndicatorError> {
    if window == 0 {
        return Err(IndicatorError::ZeroPeriod("atr_mean_window"));
    }
    let atr: Vec<Option<f64>> = bars.iter().map(|b| b.atr).collect();
    for (bar, mean) in bars.iter_mut().zip(rolling_mean(&atr, window)) {
        bar.atr_mean = mean;
    }
    Ok(())
}
