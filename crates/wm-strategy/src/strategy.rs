//! The `ActivationStrategy` trait.

use wm_core::DetectorIndex;

use crate::StrategyContext;

/// A detector activation policy.
///
/// Implementations keep only their own derived data (parameters,
/// precomputed neighbourhoods); detectors, events, and the graph are lent
/// through [`StrategyContext`] on every call.
///
/// `Send` so an engine holding a boxed strategy can be moved across threads
/// by a harness.
pub trait ActivationStrategy: Send {
    /// Short, stable name used in logs.
    fn name(&self) -> &'static str;

    /// Bind to the detector set.  Called once when the strategy is attached.
    ///
    /// Default: nothing to precompute.
    fn init(&mut self, _ctx: &mut StrategyContext<'_>) {}

    /// Establish the initial active set around `seed`.
    fn tick0(&mut self, seed: DetectorIndex, ctx: &mut StrategyContext<'_>);

    /// Update activation after this tick's events.
    fn run(&mut self, ctx: &mut StrategyContext<'_>);
}
