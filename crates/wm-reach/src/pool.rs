//! Fixed-size worker pool fed by a bounded job channel.
//!
//! Threads are spawned once and live as long as the pool.  Dropping the pool
//! closes the channel; workers run every job still queued, then exit.
//! Nothing is cancelled.  `Drop` joins every thread.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Sender, SendError};
use tracing::debug;

use crate::ReachResult;

/// A unit of work run on one pool thread.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Long-lived pool of worker threads.
pub struct WorkerPool {
    /// `None` only during `Drop`.
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `size` workers (at least one).
    pub fn new(size: usize) -> ReachResult<Self> {
        let size = size.max(1);
        let (sender, receiver) = crossbeam_channel::bounded::<Job>(size * 4);

        let mut workers = Vec::with_capacity(size);
        for i in 0..size {
            let rx = receiver.clone();
            let handle = thread::Builder::new()
                .name(format!("wm-reach-{i}"))
                .spawn(move || {
                    while let Ok(job) = rx.recv() {
                        job();
                    }
                })?;
            workers.push(handle);
        }
        debug!(workers = size, "reach worker pool started");

        Ok(Self { sender: Some(sender), workers })
    }

    /// Number of worker threads.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Queue `job` for the next free worker.  Blocks while the queue is full.
    ///
    /// Returns the job back if the pool is shutting down.
    pub fn execute(&self, job: Job) -> Result<(), Job> {
        match &self.sender {
            Some(tx) => tx.send(job).map_err(|SendError(job)| job),
            None => Err(job),
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Closing the channel ends every worker's `recv` loop.
        drop(self.sender.take());
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
        debug!("reach worker pool stopped");
    }
}
