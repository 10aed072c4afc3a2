//! Error types for shortcut computations.

use thiserror::Error;

use crate::parallel::WorkRange;

/// Errors that can occur while building grids or computing shortcuts.
#[derive(Debug, Error)]
pub enum ShortcutError {
    /// Input data does not describe a square grid.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// The per-call worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A worker terminated abnormally, the output grid is not trustworthy.
    #[error("computation incomplete: worker {worker} (rows {rows}) failed: {reason}")]
    ComputationIncomplete {
        worker: usize,
        rows: WorkRange,
        reason: String,
    },

    /// A pool thread could not be joined after the computation.
    #[error("worker pool thread {thread} terminated abnormally")]
    WorkerJoin { thread: usize },
}

/// Result type for shortcut operations.
pub type Result<T> = std::result::Result<T, ShortcutError>;
