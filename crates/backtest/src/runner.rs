//! High-level backtest runner helpers.

use serde::Serialize;
use signalbench_data::{
    BarTable, IndicatorColumn, LoadOptions, load_bar_table, write_ledger, write_monthly,
    write_trades,
};
use signalbench_indicators::{annotate, decision_warmup_bars, fill_atr_mean, validate_settings};
use signalbench_metrics::{PerformanceSummary, summarize};
use signalbench_strategy::{ThresholdStrategy, generate_decisions};
use signalbench_types::{BacktestConfig, Bar, IndicatedBar, IndicatorMode, Policy, SignalCounts};
use tracing::{info, warn};

use crate::error::BacktestError;
use crate::simulator::{SimulationOutcome, simulate};
use crate::warmup::{WarmupReport, report_warmup};

/// Result of a complete backtest run.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestReport {
    /// Configuration the run used
    pub config: BacktestConfig,
    /// True when the indicator columns were computed from OHLCV
    pub indicators_computed: bool,
    /// Warm-up measurement
    pub warmup: WarmupReport,
    /// BUY/SELL/HOLD totals
    pub signals: SignalCounts,
    /// Ledger, equity curve and trades
    pub simulation: SimulationOutcome,
    /// Monthly and whole-run statistics
    pub summary: PerformanceSummary,
}

impl BacktestReport {
    /// Serializes the report as JSON.
    ///
    /// # Errors
    /// [`BacktestError::ResultSerialize`] when serialization fails.
    pub fn to_json(&self) -> Result<String, BacktestError> {
        serde_json::to_string(self).map_err(|e| BacktestError::ResultSerialize(e.to_string()))
    }
}

/// Main entry point: receives config JSON, runs the backtest and writes its tables.
///
/// # Errors
/// - [`BacktestError::ConfigParse`] when JSON parsing fails.
/// - Any error of [`run_backtest`].
pub fn run_backtest_from_json(config_json: &str) -> Result<BacktestReport, BacktestError> {
    let config: BacktestConfig = serde_json::from_str(config_json)
        .map_err(|e| BacktestError::ConfigParse(e.to_string()))?;
    run_backtest(config)
}

/// Loads the input table, runs the pipeline and writes every configured output.
///
/// # Errors
/// - [`BacktestError::ConfigValidation`] for invalid configuration values.
/// - [`BacktestError::Data`] when loading or writing a table fails.
/// - Any error of [`backtest_bars`].
pub fn run_backtest(config: BacktestConfig) -> Result<BacktestReport, BacktestError> {
    validate_config(&config)?;

    let options = LoadOptions::with_formats(config.timestamp_formats.clone());
    let table = load_bar_table(&config.input_path, &options)?;
    info!(
        input = %config.input_path.display(),
        bars = table.bars.len(),
        reversed = table.reversed,
        "Loaded bar table"
    );

    let (bars, computed) = prepare_bars(table, &config)?;
    let report = backtest_bars(&bars, config, computed)?;
    write_outputs(&report)?;
    Ok(report)
}

/// Runs decisions, simulation and summary over prepared bars without touching disk.
///
/// # Errors
/// - [`BacktestError::Strategy`] for invalid custom thresholds.
/// - [`BacktestError::Portfolio`] for invalid cash or an untradeable close.
/// - [`BacktestError::Metrics`] when the series is empty.
pub fn backtest_bars(
    bars: &[IndicatedBar],
    config: BacktestConfig,
    indicators_computed: bool,
) -> Result<BacktestReport, BacktestError> {
    let strategy = ThresholdStrategy::new(config.policy)?;
    // bars needed for the first complete snapshot, minus that bar itself
    let expected_warmup = indicators_computed
        .then(|| decision_warmup_bars(&config.indicators).saturating_sub(1));
    let warmup = report_warmup(bars, expected_warmup);

    let run = generate_decisions(&strategy, bars);
    info!(
        policy = config.policy.name(),
        buy = run.counts.buy,
        sell = run.counts.sell,
        hold = run.counts.hold,
        "Generated decisions"
    );

    let simulation = simulate(bars, &run.decisions, config.initial_cash)?;
    let summary = summarize(&simulation.equity_curve, config.initial_cash)?
        .with_trades(&simulation.trades)
        .with_signal_counts(run.counts);
    info!("\n{summary}");

    Ok(BacktestReport {
        config,
        indicators_computed,
        warmup,
        signals: run.counts,
        simulation,
        summary,
    })
}

/// Fills the indicator columns according to `config.compute_indicators`.
///
/// Returns the bars and whether the indicators were computed from OHLCV. A
/// missing `ATR_mean` column is always derived from `ATR_14`.
///
/// # Errors
/// - [`BacktestError::Data`] when indicators are required from the input but absent.
/// - [`BacktestError::Indicator`] for invalid indicator settings.
pub fn prepare_bars(
    table: BarTable,
    config: &BacktestConfig,
) -> Result<(Vec<IndicatedBar>, bool), BacktestError> {
    let has_inputs = table.has_decision_inputs();
    let compute = match config.compute_indicators {
        IndicatorMode::Always => true,
        IndicatorMode::Auto => !has_inputs,
        IndicatorMode::Never => {
            if let Some(missing) = IndicatorColumn::DECISION_INPUTS
                .iter()
                .find(|&&column| !table.columns.has(column))
            {
                return Err(
                    signalbench_data::DataError::MissingColumn(missing.header().to_string()).into(),
                );
            }
            false
        }
    };

    if compute {
        if has_inputs {
            info!("Recomputing indicator columns from OHLCV");
        } else {
            warn!("Input lacks indicator columns, computing them from OHLCV");
        }
        let raw: Vec<Bar> = table.bars.iter().map(|b| b.bar).collect();
        return Ok((annotate(&raw, &config.indicators)?, true));
    }

    let mut bars = table.bars;
    if !table.columns.has(IndicatorColumn::AtrMean) {
        info!(
            window = config.indicators.atr_mean_window,
            "Deriving ATR_mean from ATR_14"
        );
        fill_atr_mean(&mut bars, config.indicators.atr_mean_window)?;
    }
    Ok((bars, false))
}

fn write_outputs(report: &BacktestReport) -> Result<(), BacktestError> {
    let config = &report.config;
    // validate_config guarantees at least one format
    let timestamp_format = config
        .timestamp_formats
        .first()
        .map_or(signalbench_types::DEFAULT_TIMESTAMP_FORMAT, String::as_str);

    write_ledger(&config.output_path, &report.simulation.ledger, timestamp_format)?;
    write_monthly(&config.monthly_output_path, &report.summary.monthly)?;
    info!(
        ledger = %config.output_path.display(),
        monthly = %config.monthly_output_path.display(),
        "Wrote result tables"
    );

    if let Some(path) = &config.trades_output_path {
        write_trades(path, &report.simulation.trades, timestamp_format)?;
        info!(trades = %path.display(), "Wrote trades table");
    }
    Ok(())
}

/// Checks a configuration before any data is read.
///
/// # Errors
/// [`BacktestError::ConfigValidation`] describing the first invalid value.
pub fn validate_config(config: &BacktestConfig) -> Result<(), BacktestError> {
    if config.input_path.as_os_str().is_empty() {
        return Err(BacktestError::ConfigValidation(
            "input_path is empty".to_string(),
        ));
    }
    if config.output_path.as_os_str().is_empty() {
        return Err(BacktestError::ConfigValidation(
            "output_path is empty".to_string(),
        ));
    }
    if config.monthly_output_path.as_os_str().is_empty() {
        return Err(BacktestError::ConfigValidation(
            "monthly_output_path is empty".to_string(),
        ));
    }

    if !config.initial_cash.is_finite() || config.initial_cash < 0.0 {
        return Err(BacktestError::ConfigValidation(format!(
            "initial_cash must be finite and >= 0, got {}",
            config.initial_cash
        )));
    }

    if let Policy::Custom(thresholds) = config.policy
        && !thresholds.is_finite()
    {
        return Err(BacktestError::ConfigValidation(
            "custom policy thresholds must be finite".to_string(),
        ));
    }

    if config.timestamp_formats.is_empty() {
        return Err(BacktestError::ConfigValidation(
            "timestamp_formats must not be empty".to_string(),
        ));
    }
    if let Some(format) = config.timestamp_formats.iter().find(|f| f.trim().is_empty()) {
        return Err(BacktestError::ConfigValidation(format!(
            "invalid timestamp format '{format}'"
        )));
    }

    validate_settings(&config.indicators)
        .map_err(|e| BacktestError::ConfigValidation(format!("indicators: {e}")))?;

    Ok(())
}
