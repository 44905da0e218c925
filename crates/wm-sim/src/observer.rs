//! Observer hooks for [`Engine::run_to_completion`][crate::Engine::run_to_completion].

use wm_core::{Event, Tick};

/// Callbacks invoked while the engine runs to completion.
///
/// Both methods default to no-ops.
///
/// # Example — event logger
///
/// ```rust,ignore
/// struct Detections(usize);
///
/// impl EngineObserver for Detections {
///     fn on_tick_end(&mut self, _tick: Tick, events: &[Event]) {
///         self.0 += events.iter().filter(|e| e.is_detect()).count();
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called after every tick that advanced the clock, with that tick's
    /// events (before the caller had a chance to drain them).
    fn on_tick_end(&mut self, _tick: Tick, _events: &[Event]) {}

    /// Called once when the engine reports done.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
