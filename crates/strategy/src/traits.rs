//! Signal generator trait

use signalbench_types::{Decision, IndicatedBar};

/// Maps one bar's indicator snapshot to a decision.
///
/// Generators are pure: the decision for a bar depends only on that bar's
/// fields, never on earlier calls. A bar whose inputs are unavailable must
/// yield HOLD rather than an error.
pub trait SignalGenerator: Send + Sync {
    /// Decides the action for a bar.
    fn decide(&self, bar: &IndicatedBar) -> Decision;

    /// Name of the generator for logs.
    fn name(&self) -> &str;
}
