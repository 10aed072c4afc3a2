//! Common interface over the two engines.

use crate::baseline::baseline_compute;
use crate::error::Result;
use crate::grid::Grid;
use crate::parallel::{ParallelEngine, RowKernel};

/// Something that turns a grid into its shortcut matrix.
pub trait ShortcutEngine {
    /// Short name used in logs and benchmark output.
    fn name(&self) -> &'static str;

    fn compute(&self, d: &Grid) -> Result<Grid>;
}

/// Single-threaded reference engine, see [`baseline_compute`].
#[derive(Debug, Default, Clone, Copy)]
pub struct BaselineEngine;

impl ShortcutEngine for BaselineEngine {
    fn name(&self) -> &'static str {
        "baseline"
    }

    fn compute(&self, d: &Grid) -> Result<Grid> {
        Ok(baseline_compute(d))
    }
}

impl<K: RowKernel> ShortcutEngine for ParallelEngine<K> {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn compute(&self, d: &Grid) -> Result<Grid> {
        ParallelEngine::compute(self, d)
    }
}
