//! Batched reach-set computation on the worker pool.
//!
//! A batch of `B` positions is split into contiguous chunks, one job per
//! chunk, with at most `min(pool size, B / 32)` jobs.  Each job writes only
//! its own chunk; the caller blocks on a shared completion counter and then
//! stitches the chunks back together in input order, so the result does not
//! depend on scheduling.

use std::sync::{Arc, Condvar, Mutex, PoisonError};

use tracing::debug;

use wm_core::{DetectorIndex, Point};

use crate::pool::Job;
use crate::{DetectorGrid, ReachResult, WorkerPool};

/// Below this many positions per job, splitting costs more than it saves.
pub const MIN_POSITIONS_PER_JOB: usize = 32;

type Chunk = Vec<Vec<DetectorIndex>>;

/// Per-batch completion state shared between the caller and its jobs.
struct Completion {
    state: Mutex<BatchState>,
    done: Condvar,
}

struct BatchState {
    finished: usize,
    chunks: Vec<Option<Chunk>>,
}

impl Completion {
    fn new(jobs: usize) -> Self {
        Self {
            state: Mutex::new(BatchState { finished: 0, chunks: vec![None; jobs] }),
            done: Condvar::new(),
        }
    }

    fn finish(&self, job: usize, chunk: Chunk) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.chunks[job] = Some(chunk);
        state.finished += 1;
        drop(state);
        self.done.notify_one();
    }

    /// Block until `jobs` chunks are in, then return them in job order.
    fn wait(&self, jobs: usize) -> Vec<Chunk> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        while state.finished < jobs {
            state = self.done.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
        state.chunks.iter_mut().map(|c| c.take().unwrap_or_default()).collect()
    }
}

// ── ProximityEvaluator ────────────────────────────────────────────────────────

/// Computes, for many adversary positions at once, the detectors in reach.
pub struct ProximityEvaluator {
    pool: WorkerPool,
    grid: Option<Arc<DetectorGrid>>,
}

impl ProximityEvaluator {
    /// Start the pool with `workers` threads; no grid attached yet.
    pub fn new(workers: usize) -> ReachResult<Self> {
        Ok(Self { pool: WorkerPool::new(workers)?, grid: None })
    }

    /// Replace the attached grid.  The previous grid is released once no
    /// in-flight batch holds it.
    pub fn set_grid(&mut self, grid: Option<Arc<DetectorGrid>>) {
        self.grid = grid;
    }

    pub fn grid(&self) -> Option<&DetectorGrid> {
        self.grid.as_deref()
    }

    pub fn workers(&self) -> usize {
        self.pool.size()
    }

    /// Number of pool jobs a batch of `batch` positions is split into.
    pub fn job_count(&self, batch: usize) -> usize {
        (batch / MIN_POSITIONS_PER_JOB).min(self.pool.size())
    }

    /// Reach set for every position, indexed like `positions`.
    ///
    /// With no grid attached every reach set is empty.  Batches too small to
    /// split are evaluated on the calling thread.
    pub fn precompute(&self, positions: &[Point]) -> Vec<Vec<DetectorIndex>> {
        let Some(grid) = &self.grid else {
            return vec![Vec::new(); positions.len()];
        };

        let jobs = self.job_count(positions.len());
        if jobs == 0 {
            return positions.iter().map(|&p| grid.reach(p)).collect();
        }

        let total = positions.len();
        let shared: Arc<[Point]> = positions.into();
        let completion = Arc::new(Completion::new(jobs));

        for job in 0..jobs {
            let start = job * total / jobs;
            let end   = (job + 1) * total / jobs;
            let grid       = Arc::clone(grid);
            let shared     = Arc::clone(&shared);
            let completion = Arc::clone(&completion);
            let work: Job = Box::new(move || {
                let chunk = shared[start..end].iter().map(|&p| grid.reach(p)).collect();
                completion.finish(job, chunk);
            });
            // Only fails while the pool is being torn down; run it here instead.
            if let Err(work) = self.pool.execute(work) {
                work();
            }
        }

        let out: Vec<Vec<DetectorIndex>> = completion.wait(jobs).into_iter().flatten().collect();
        debug!(positions = total, jobs, "reach batch precomputed");
        out
    }
}
