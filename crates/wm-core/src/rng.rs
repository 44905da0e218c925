//! Engine-owned, reseedable RNG.
//!
//! There is no process-global generator: the engine owns one `SimRng` and
//! lends it to every component that needs randomness (transmission draws,
//! strategy sampling, the weighted edge sampler).  Reseeding it is
//! independent of all other simulation state.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.
///
/// Used only in single-threaded contexts; the worker pool never draws.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy (non-reproducible runs).
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Restart the stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.0 = SmallRng::seed_from_u64(seed);
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
