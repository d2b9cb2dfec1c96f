//! Indicator traits.

use signalbench_types::Bar;

/// Trait for single-output indicators.
///
/// Indicators compute over the full bar series and return one value per bar.
/// Values before the warm-up window is full are `None`.
pub trait Indicator: Send + Sync {
    /// Computes the indicator for all bars.
    ///
    /// The result has the same length as `bars`; the first
    /// `warmup_periods() - 1` entries are `None`.
    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>>;

    /// Name of the indicator (e.g., "EMA", "ATR").
    fn name(&self) -> &str;

    /// Number of bars required for the first value.
    fn warmup_periods(&self) -> usize;
}

/// Trait for indicators producing several aligned series (e.g., MACD).
pub trait MultiOutputIndicator: Send + Sync {
    /// Type of the output structure
    type Output;

    /// Computes all outputs at once.
    fn compute_all(&self, bars: &[Bar]) -> Self::Output;

    /// Name of the indicator.
    fn name(&self) -> &str;

    /// Number of bars required before every output has a value.
    fn warmup_periods(&self) -> usize;

    /// List of output names.
    fn output_names(&self) -> &'static [&'static str];
}
