//! Subcommand arguments and handlers.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use signalbench_backtest::{BacktestError, run_backtest};
use signalbench_data::{LoadOptions, load_bar_table, write_indicator_table, write_pattern_table};
use signalbench_indicators::annotate;
use signalbench_strategy::{
    DEFAULT_HORIZON, DEFAULT_MIN_BODY, DEFAULT_PIP_THRESHOLD, EngulfingDetector, study_engulfing,
};
use signalbench_types::{
    BacktestConfig, Bar, IndicatorMode, IndicatorSettings, Policy, default_timestamp_formats,
};
use tracing::info;

/// Named policy presets selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Strict entry thresholds
    Conservative,
    /// Loosened entry thresholds
    Aggressive,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Conservative => Policy::Conservative,
            PolicyArg::Aggressive => Policy::Aggressive,
        }
    }
}

/// Indicator computation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IndicatorModeArg {
    /// Compute only when the input lacks the indicator columns
    Auto,
    /// Always recompute from OHLCV
    Always,
    /// Never compute
    Never,
}

impl From<IndicatorModeArg> for IndicatorMode {
    fn from(arg: IndicatorModeArg) -> Self {
        match arg {
            IndicatorModeArg::Auto => IndicatorMode::Auto,
            IndicatorModeArg::Always => IndicatorMode::Always,
            IndicatorModeArg::Never => IndicatorMode::Never,
        }
    }
}

/// Arguments of `signalbench backtest`.
#[derive(Debug, Args)]
pub struct BacktestArgs {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input bar table (required without --config)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Per-bar output table
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Monthly summary table
    #[arg(long)]
    pub monthly_output: Option<PathBuf>,

    /// Completed-trades table
    #[arg(long)]
    pub trades_output: Option<PathBuf>,

    /// Starting cash
    #[arg(long)]
    pub initial_cash: Option<f64>,

    /// Signal policy
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// When to compute indicator columns from OHLCV
    #[arg(long, value_enum)]
    pub compute_indicators: Option<IndicatorModeArg>,

    /// Accepted timestamp format, repeatable; the first is used for output
    #[arg(long = "timestamp-format")]
    pub timestamp_formats: Vec<String>,

    /// Write the full run report as JSON
    #[arg(long)]
    pub report_json: Option<PathBuf>,
}

impl BacktestArgs {
    /// Builds the run configuration from the config file and flag overrides.
    ///
    /// # Errors
    /// - [`BacktestError::ConfigParse`] when the config file cannot be read or parsed.
    /// - [`BacktestError::ConfigValidation`] when no input path is given.
    pub fn resolve_config(&self) -> Result<BacktestConfig, BacktestError> {
        let mut config = match (&self.config, &self.input) {
            (Some(path), _) => read_config(path)?,
            (None, Some(input)) => BacktestConfig::for_input(input.clone()),
            (None, None) => {
                return Err(BacktestError::ConfigValidation(
                    "either --config or --input is required".to_string(),
                ));
            }
        };

        if let Some(input) = &self.input {
            config.input_path.clone_from(input);
        }
        if let Some(output) = &self.output {
            config.output_path.clone_from(output);
        }
        if let Some(monthly) = &self.monthly_output {
            config.monthly_output_path.clone_from(monthly);
        }
        if let Some(trades) = &self.trades_output {
            config.trades_output_path = Some(trades.clone());
        }
        if let Some(cash) = self.initial_cash {
            config.initial_cash = cash;
        }
        if let Some(policy) = self.policy {
            config.policy = policy.into();
        }
        if let Some(mode) = self.compute_indicators {
            config.compute_indicators = mode.into();
        }
        if !self.timestamp_formats.is_empty() {
            config.timestamp_formats.clone_from(&self.timestamp_formats);
        }
        Ok(config)
    }
}

fn read_config(path: &Path) -> Result<BacktestConfig, BacktestError> {
    let text = fs::read_to_string(path)
        .map_err(|e| BacktestError::ConfigParse(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| BacktestError::ConfigParse(format!("{}: {e}", path.display())))
}

/// Runs `signalbench backtest`.
///
/// # Errors
/// Any error of config resolution, the run, or writing the JSON report.
pub fn backtest(args: &BacktestArgs) -> Result<(), BacktestError> {
    let config = args.resolve_config()?;
    let report = run_backtest(config)?;

    if let Some(path) = &args.report_json {
        fs::write(path, report.to_json()?).map_err(|e| BacktestError::Data(e.into()))?;
        info!(report = %path.display(), "Wrote JSON report");
    }
    Ok(())
}

/// Arguments of `signalbench indicators`.
#[derive(Debug, Args)]
pub struct IndicatorsArgs {
    /// Raw OHLCV table, any row order
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output table, `<stem>_with_indicators.<ext>` next to the input by default
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Decimal places for every numeric column
    #[arg(long, default_value_t = 2)]
    pub decimals: u32,

    /// Accepted timestamp format, repeatable; the first is used for output
    #[arg(long = "timestamp-format")]
    pub timestamp_formats: Vec<String>,
}

/// Runs `signalbench indicators`.
///
/// Indicators are computed oldest-first and written back in the input's row order.
///
/// # Errors
/// Any loading, indicator or writing error.
pub fn indicators(args: &IndicatorsArgs) -> Result<(), BacktestError> {
    let formats = formats_or_default(&args.timestamp_formats);
    let table = load_bar_table(&args.input, &LoadOptions::with_formats(formats.clone()))?;

    let raw: Vec<Bar> = table.bars.iter().map(|b| b.bar).collect();
    let annotated = table.to_file_order(annotate(&raw, &IndicatorSettings::default())?);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| sibling_path(&args.input, "_with_indicators"));
    write_indicator_table(&output, &annotated, &formats[0], args.decimals)?;
    info!(
        output = %output.display(),
        rows = annotated.len(),
        decimals = args.decimals,
        "Wrote indicator table"
    );
    Ok(())
}

/// Arguments of `signalbench engulfing`.
#[derive(Debug, Args)]
pub struct EngulfingArgs {
    /// OHLCV table
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output table, `<stem>_engulfing.<ext>` next to the input by default
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Bars scanned after each bar for the trend label
    #[arg(long, default_value_t = DEFAULT_HORIZON)]
    pub horizon: usize,

    /// Excursion beyond the body that counts as a trend
    #[arg(long, default_value_t = DEFAULT_PIP_THRESHOLD)]
    pub pip_threshold: f64,

    /// Minimum candle body for both bars of a pattern
    #[arg(long, default_value_t = DEFAULT_MIN_BODY)]
    pub min_body: f64,

    /// Accepted timestamp format, repeatable; the first is used for output
    #[arg(long = "timestamp-format")]
    pub timestamp_formats: Vec<String>,
}

/// Runs `signalbench engulfing`.
///
/// # Errors
/// Any loading, parameter or writing error.
pub fn engulfing(args: &EngulfingArgs) -> Result<(), BacktestError> {
    let formats = formats_or_default(&args.timestamp_formats);
    let table = load_bar_table(&args.input, &LoadOptions::with_formats(formats.clone()))?;
    let bars: Vec<Bar> = table.bars.iter().map(|b| b.bar).collect();

    let detector = EngulfingDetector::new(args.min_body)?;
    let study = study_engulfing(&bars, &detector, args.horizon, args.pip_threshold)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| sibling_path(&args.input, "_engulfing"));
    write_pattern_table(
        &output,
        &bars,
        &study.signal_codes(),
        &study.trend_codes(),
        &formats[0],
    )?;
    info!(output = %output.display(), rows = bars.len(), "Wrote engulfing table");
    Ok(())
}

fn formats_or_default(formats: &[String]) -> Vec<String> {
    if formats.is_empty() {
        default_timestamp_formats()
    } else {
        formats.to_vec()
    }
}

/// `dir/stem.ext` -> `dir/stem<suffix>.ext`; `.csv` when the input has no extension.
fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "bars".into(), |s| s.to_string_lossy());
    let ext = input
        .extension()
        .map_or_else(|| "csv".into(), |e| e.to_string_lossy());
    input.with_file_name(format!("{stem}{suffix}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backtest_args(input: Option<&str>) -> BacktestArgs {
        BacktestArgs {
            config: None,
            input: input.map(PathBuf::from),
            output: None,
            monthly_output: None,
            trades_output: None,
            initial_cash: None,
            policy: None,
            compute_indicators: None,
            timestamp_formats: Vec::new(),
            report_json: None,
        }
    }

    #[test]
    fn test_sibling_path() {
        assert_eq!(
            sibling_path(Path::new("data/TSLA.csv"), "_with_indicators"),
            PathBuf::from("data/TSLA_with_indicators.csv")
        );
        assert_eq!(
            sibling_path(Path::new("bars"), "_engulfing"),
            PathBuf::from("bars_engulfing.csv")
        );
    }

    #[test]
    fn test_resolve_requires_input() {
        let err = backtest_args(None).resolve_config().unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_flag_overrides() {
        let mut args = backtest_args(Some("bars.csv"));
        args.initial_cash = Some(500.0);
        args.policy = Some(PolicyArg::Conservative);
        args.compute_indicators = Some(IndicatorModeArg::Always);
        args.timestamp_formats = vec!["%Y-%m-%d %H:%M:%S".to_string()];

        let config = args.resolve_config().unwrap();
        assert_eq!(config.input_path, PathBuf::from("bars.csv"));
        assert!((config.initial_cash - 500.0).abs() < f64::EPSILON);
        assert_eq!(config.policy, Policy::Conservative);
        assert_eq!(config.compute_indicators, IndicatorMode::Always);
        assert_eq!(config.timestamp_formats.len(), 1);
    }

    #[test]
    fn test_config_file_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"input_path": "a.csv", "initial_cash": 2500.0, "policy": "conservative"}"#,
        )
        .unwrap();

        let mut args = backtest_args(Some("b.csv"));
        args.config = Some(path);
        let config = args.resolve_config().unwrap();

        assert_eq!(config.input_path, PathBuf::from("b.csv"));
        assert!((config.initial_cash - 2_500.0).abs() < f64::EPSILON);
        assert_eq!(config.policy, Policy::Conservative);
    }

    #[test]
    fn test_unreadable_config_is_config_error() {
        let mut args = backtest_args(None);
        args.config = Some(PathBuf::from("no/such/config.json"));
        assert!(matches!(
            args.resolve_config(),
            Err(BacktestError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_indicators_preserve_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("TSLA.csv");
        fs::write(
            &input,
            "timestamp,open,high,low,close,volume\n\
             01/02/2024 09:32,101,102,100,101.5,300\n\
             01/02/2024 09:31,100,101.456,99.5,101,200\n\
             01/02/2024 09:30,100,100.5,99,100,100\n",
        )
        .unwrap();

        indicators(&IndicatorsArgs {
            input: input.clone(),
            output: None,
            decimals: 2,
            timestamp_formats: Vec::new(),
        })
        .unwrap();

        let written = fs::read_to_string(dir.path().join("TSLA_with_indicators.csv")).unwrap();
        let rows: Vec<&str> = written.lines().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[1].starts_with("01/02/2024 09:32,"));
        assert!(rows[2].contains("101.46"));
        assert!(rows[3].starts_with("01/02/2024 09:30,"));
    }

    #[test]
    fn test_engulfing_writes_codes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bars.csv");
        fs::write(
            &input,
            "timestamp,open,high,low,close,volume\n\
             01/02/2024 09:30,10.00,10.01,10.00,10.01,1\n\
             01/02/2024 09:31,10.015,10.015,9.995,9.995,1\n\
             01/02/2024 09:32,9.995,9.995,9.98,9.98,1\n\
             01/02/2024 09:33,9.98,9.98,9.97,9.97,1\n\
             01/02/2024 09:34,9.97,9.97,9.96,9.96,1\n\
             01/02/2024 09:35,9.96,9.96,9.95,9.95,1\n",
        )
        .unwrap();
        let output = dir.path().join("out.csv");

        engulfing(&EngulfingArgs {
            input,
            output: Some(output.clone()),
            horizon: DEFAULT_HORIZON,
            pip_threshold: DEFAULT_PIP_THRESHOLD,
            min_body: DEFAULT_MIN_BODY,
            timestamp_formats: Vec::new(),
        })
        .unwrap();

        let written = fs::read_to_string(output).unwrap();
        let rows: Vec<&str> = written.lines().collect();
        assert!(rows[0].ends_with("Signal,Trend"));
        assert!(rows[2].ends_with(",1,1"));
        // tail bars have no full horizon
        assert!(rows[6].ends_with(",0,"));
    }

    #[test]
    fn test_engulfing_rejects_bad_params() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bars.csv");
        fs::write(
            &input,
            "timestamp,open,high,low,close,volume\n01/02/2024 09:30,1,1,1,1,1\n",
        )
        .unwrap();

        let err = engulfing(&EngulfingArgs {
            input,
            output: None,
            horizon: 0,
            pip_threshold: DEFAULT_PIP_THRESHOLD,
            min_body: DEFAULT_MIN_BODY,
            timestamp_formats: Vec::new(),
        })
        .unwrap_err();
        assert_eq!(err.error_category(), "strategy");
        assert!(!dir.path().join("bars_engulfing.csv").exists());
    }
}
