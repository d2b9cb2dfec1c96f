use std::path::PathBuf;

/// Main backtest configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BacktestConfig {
    /// Input bar table
    pub input_path: PathBuf,
    /// Per-bar output table (decision, reason, state, equity)
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Monthly summary table
    #[serde(default = "default_monthly_output_path")]
    pub monthly_output_path: PathBuf,
    /// Completed-trades table (not written when absent)
    #[serde(default)]
    pub trades_output_path: Option<PathBuf>,
    /// Starting cash
    #[serde(default = "default_initial_cash")]
    pub initial_cash: f64,
    /// Signal policy
    #[serde(default)]
    pub policy: Policy,
    /// When to compute indicator columns instead of reading them
    #[serde(default)]
    pub compute_indicators: IndicatorMode,
    /// Accepted timestamp formats, tried in order; the first one is used for output
    #[serde(default = "default_timestamp_formats")]
    pub timestamp_formats: Vec<String>,
    /// Indicator periods and windows
    #[serde(default)]
    pub indicators: IndicatorSettings,
}

impl BacktestConfig {
    /// Config with defaults for everything except the input path.
    #[must_use]
    pub fn for_input(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: default_output_path(),
            monthly_output_path: default_monthly_output_path(),
            trades_output_path: None,
            initial_cash: default_initial_cash(),
            policy: Policy::default(),
            compute_indicators: IndicatorMode::default(),
            timestamp_formats: default_timestamp_formats(),
            indicators: IndicatorSettings::default(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("trading_results_with_signals.csv")
}

fn default_monthly_output_path() -> PathBuf {
    PathBuf::from("monthly_performance_summary.csv")
}

fn default_initial_cash() -> f64 {
    10_000.0
}

/// Timestamp format of the historical indicator tables.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Timestamp format of raw intraday downloads.
pub const VENDOR_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default accepted timestamp formats.
#[must_use]
pub fn default_timestamp_formats() -> Vec<String> {
    vec![
        DEFAULT_TIMESTAMP_FORMAT.to_string(),
        VENDOR_TIMESTAMP_FORMAT.to_string(),
    ]
}

/// Indicator computation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorMode {
    /// Compute when the input lacks the decision indicator columns
    #[default]
    Auto,
    /// Always recompute from OHLCV
    Always,
    /// Never compute; missing columns are an error
    Never,
}

/// Signal policy selection
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Strict entry: positive histogram, oversold RSI, expanding ATR
    Conservative,
    /// Loosened entry thresholds
    #[default]
    Aggressive,
    /// Caller-supplied thresholds
    Custom(Thresholds),
}

impl Policy {
    /// Threshold set for this policy.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        match self {
            Policy::Conservative => Thresholds::CONSERVATIVE,
            Policy::Aggressive => Thresholds::AGGRESSIVE,
            Policy::Custom(t) => *t,
        }
    }

    /// Short policy name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Conservative => "conservative",
            Policy::Aggressive => "aggressive",
            Policy::Custom(_) => "custom",
        }
    }
}

/// Threshold set for the indicator rule generator.
///
/// BUY when `histogram > buy_histogram_above`, `rsi < buy_rsi_below` and
/// `atr > buy_atr_ratio * atr_mean`. SELL when `histogram < sell_histogram_below`
/// and `rsi > sell_rsi_above`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Thresholds {
    /// Histogram must exceed this to buy
    pub buy_histogram_above: f64,
    /// RSI must be below this to buy
    pub buy_rsi_below: f64,
    /// ATR must exceed this multiple of the ATR mean to buy
    pub buy_atr_ratio: f64,
    /// Histogram must be below this to sell
    pub sell_histogram_below: f64,
    /// RSI must exceed this to sell
    pub sell_rsi_above: f64,
}

impl Thresholds {
    /// Conservative preset.
    pub const CONSERVATIVE: Thresholds = Thresholds {
        buy_histogram_above: 0.0,
        buy_rsi_below: 30.0,
        buy_atr_ratio: 1.0,
        sell_histogram_below: 0.0,
        sell_rsi_above: 70.0,
    };

    /// Aggressive preset. Sell side matches the conservative preset.
    pub const AGGRESSIVE: Thresholds = Thresholds {
        buy_histogram_above: -0.1,
        buy_rsi_below: 45.0,
        buy_atr_ratio: 0.8,
        sell_histogram_below: 0.0,
        sell_rsi_above: 70.0,
    };

    /// True when every threshold is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [
            self.buy_histogram_above,
            self.buy_rsi_below,
            self.buy_atr_ratio,
            self.sell_histogram_below,
            self.sell_rsi_above,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Indicator periods and windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    /// Fast EMA span of the MACD line
    pub macd_fast: usize,
    /// Slow EMA span of the MACD line
    pub macd_slow: usize,
    /// EMA span of the MACD signal line
    pub macd_signal: usize,
    /// RSI period
    pub rsi_period: usize,
    /// ATR period
    pub atr_period: usize,
    /// Rolling window of the ATR mean
    pub atr_mean_window: usize,
    /// Rolling window of the VWAP
    pub vwap_window: usize,
    /// SMA overlay period
    pub sma_period: usize,
    /// EMA overlay period
    pub ema_period: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_period: 14,
            atr_period: 14,
            atr_mean_window: 14,
            vwap_window: 14,
            sma_period: 50,
            ema_period: 200,
        }
    }
}
