//! Shortcut matrices: `r[i][j] = min_k (d[i][k] + d[k][j])`.
//!
//! One round of min-plus relaxation over a square grid of distances,
//! computed either by the plain triple loop ([`baseline_compute`]) or by a
//! multi-threaded engine that transposes the input for sequential access
//! and splits output rows between workers ([`parallel_compute`]).
//!
//! ```
//! use shortcut::{baseline_compute, parallel_compute, Grid};
//!
//! let d = Grid::random(64);
//! assert_eq!(parallel_compute(&d).unwrap(), baseline_compute(&d));
//! ```

pub mod baseline;
pub mod engine;
pub mod error;
pub mod grid;
pub mod parallel;
pub mod timer;

pub use baseline::baseline_compute;
pub use engine::{BaselineEngine, ShortcutEngine};
pub use error::{Result, ShortcutError};
pub use grid::Grid;
pub use parallel::{parallel_compute, ParallelEngine};
