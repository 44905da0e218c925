//! Simulation tick counter and engine configuration.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.  Tick 0 is the moment the adversary
/// is placed; the first `do_tick` call produces tick 1.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Default number of positions precomputed per batch.
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Engine-level knobs that stay fixed for the engine's lifetime.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Fixed RNG seed.  `None` seeds from OS entropy and disables reseeding
    /// on `half_reset`.
    pub seed: Option<u64>,

    /// Maximum number of adversary positions walked and evaluated per batch.
    pub batch_size: usize,

    /// Worker pool size.  `None` uses the available hardware parallelism.
    pub worker_threads: Option<usize>,
}

impl EngineConfig {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.batch_size == 0 {
            return Err(CoreError::Config("batch_size must be at least 1".into()));
        }
        Ok(())
    }

    /// Resolve `worker_threads` against the host, never returning 0.
    pub fn resolved_workers(&self) -> usize {
        match self.worker_threads {
            Some(n) => n.max(1),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed:           None,
            batch_size:     DEFAULT_BATCH_SIZE,
            worker_threads: None,
        }
    }
}
