//! `wm-reach` — "which detectors can hear this point?"
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`grid`]      | `DetectorGrid` (k×k cells), lazy `ReachIter` queries       |
//! | [`pool`]      | `WorkerPool` — long-lived threads fed by a job channel     |
//! | [`evaluator`] | `ProximityEvaluator` — batched reach sets on the pool      |
//! | [`error`]     | `ReachError`, `ReachResult<T>`                             |
//!
//! # Concurrency
//!
//! Workers only read the (immutable, `Arc`-shared) grid and each owns a
//! contiguous output chunk, so the only synchronised state is the pool's job
//! channel and a per-batch completion counter.

pub mod error;
pub mod evaluator;
pub mod grid;
pub mod pool;

#[cfg(test)]
mod tests;

pub use error::{ReachError, ReachResult};
pub use evaluator::ProximityEvaluator;
pub use grid::{DetectorGrid, ReachIter};
pub use pool::WorkerPool;
