//! Multi-threaded shortcut engine.
//!
//! A call goes through four steps:
//!
//! 1. [`transpose`] the input once, so the kernel reads both operands
//!    row by row.
//! 2. [`partition`] the output rows into one [`WorkRange`] per worker.
//! 3. Split the output buffer into disjoint row blocks and hand each block
//!    to its own task on a thread pool built for this call only.
//! 4. Join every task and every pool thread; a task that panicked fails
//!    the whole call.

mod kernel;
mod partition;
mod transpose;

use std::any::Any;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, instrument, trace};

use crate::error::{Result, ShortcutError};
use crate::grid::Grid;

pub use kernel::{MinPlusKernel, RowKernel};
pub use partition::{available_workers, partition, worker_count, WorkRange};
pub use transpose::transpose;

/// Shortcut engine that splits rows across a per-call worker pool.
///
/// Produces results bit-identical to [`baseline_compute`](crate::baseline_compute):
/// each output cell is a running minimum over the same `k` in the same
/// order.
///
/// # Example
///
/// ```
/// use shortcut::{Grid, ParallelEngine};
///
/// let d = Grid::from_rows(vec![
///     vec![0.0, 3.0, 8.0],
///     vec![9.0, 0.0, 1.0],
///     vec![4.0, 2.0, 0.0],
/// ])
/// .unwrap();
/// let r = ParallelEngine::new().compute(&d).unwrap();
/// assert_eq!(r.entry(0, 2), 4.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParallelEngine<K = MinPlusKernel> {
    max_workers: Option<NonZeroUsize>,
    kernel: K,
}

impl ParallelEngine {
    /// Engine sized to the available hardware parallelism.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: RowKernel> ParallelEngine<K> {
    /// Never use more than `max` workers, whatever the hardware reports.
    pub fn with_max_workers(mut self, max: NonZeroUsize) -> Self {
        self.max_workers = Some(max);
        self
    }

    /// Replace the per-row kernel.
    pub fn with_kernel<K2: RowKernel>(self, kernel: K2) -> ParallelEngine<K2> {
        ParallelEngine {
            max_workers: self.max_workers,
            kernel,
        }
    }

    /// Worker count this engine uses for a grid of size `n`.
    pub fn workers_for(&self, n: usize) -> usize {
        let hint = available_workers();
        let hint = match self.max_workers {
            Some(max) => hint.min(max.get()),
            None => hint,
        };
        worker_count(n, hint)
    }

    /// Compute the shortcut matrix of `d`.
    ///
    /// Blocks until every worker has finished. Fails with
    /// [`ShortcutError::ComputationIncomplete`] if any worker terminated
    /// abnormally; a partially filled grid is never returned.
    #[instrument(skip_all, fields(n = d.size()))]
    pub fn compute(&self, d: &Grid) -> Result<Grid> {
        let n = d.size();
        let workers = self.workers_for(n);
        if workers == 0 {
            return Ok(Grid::empty());
        }

        let t = transpose(d);
        let ranges = partition(n, workers);
        debug!(workers = ranges.len(), "dispatching shortcut workers");

        let mut r = vec![0.0; n * n];
        // One exclusive row block of r per worker
        let mut blocks = Vec::with_capacity(ranges.len());
        let mut rest = r.as_mut_slice();
        for range in &ranges {
            let (block, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * n);
            blocks.push(block);
            rest = tail;
        }
        let mut failures: Vec<Option<String>> = vec![None; ranges.len()];

        let kernel = &self.kernel;
        let (d, t) = (d.as_slice(), t.as_slice());
        // Keep every pool thread's handle so they can be joined below
        let mut threads = Vec::with_capacity(ranges.len());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(ranges.len())
            .thread_name(|i| format!("shortcut-worker-{i}"))
            .spawn_handler(|thread| {
                let mut builder = std::thread::Builder::new();
                if let Some(name) = thread.name() {
                    builder = builder.name(name.to_owned());
                }
                threads.push(builder.spawn(move || thread.run())?);
                Ok(())
            })
            .build()?;

        pool.scope(|s| {
            let jobs = ranges.iter().zip(blocks).zip(failures.iter_mut());
            for (worker, ((&range, block), failure)) in jobs.enumerate() {
                s.spawn(move |_| {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                        kernel.compute_rows(range, d, t, n, block)
                    }));
                    match outcome {
                        Ok(()) => trace!(worker, %range, "worker finished"),
                        Err(payload) => *failure = Some(panic_message(payload.as_ref())),
                    }
                });
            }
        });

        // Dropping the pool tells its threads to exit, join waits until they have
        drop(pool);
        for (thread, handle) in threads.into_iter().enumerate() {
            if handle.join().is_err() {
                error!(thread, "shortcut pool thread panicked");
                return Err(ShortcutError::WorkerJoin { thread });
            }
        }

        for (worker, (range, failure)) in ranges.into_iter().zip(failures).enumerate() {
            if let Some(reason) = failure {
                error!(worker, %range, %reason, "shortcut worker failed");
                return Err(ShortcutError::ComputationIncomplete {
                    worker,
                    rows: range,
                    reason,
                });
            }
        }
        Ok(Grid::from_square_buffer(n, r))
    }
}

/// Shortcut matrix of `d` using a [`ParallelEngine`] sized to the machine.
pub fn parallel_compute(d: &Grid) -> Result<Grid> {
    ParallelEngine::new().compute(d)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_owned()
    }
}
