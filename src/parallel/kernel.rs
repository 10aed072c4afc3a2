//! Per-worker compute kernel.

use super::WorkRange;

/// Fills the output rows of one [`WorkRange`].
///
/// `d` and `t` are the row-major input and its transpose, both `n * n`
/// long. `out` holds exactly the rows in `rows`, i.e. `rows.len() * n`
/// values, with `out[0..n]` being row `rows.start`.
pub trait RowKernel: Sync {
    fn compute_rows(&self, rows: WorkRange, d: &[f32], t: &[f32], n: usize, out: &mut [f32]);
}

/// The min-plus kernel: `out[i][j] = min_k (d[i][k] + t[j][k])`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinPlusKernel;

impl RowKernel for MinPlusKernel {
    #[inline]
    fn compute_rows(&self, rows: WorkRange, d: &[f32], t: &[f32], n: usize, out: &mut [f32]) {
        debug_assert_eq!(out.len(), rows.len() * n);
        for (i, r_row) in rows.rows().zip(out.chunks_mut(n)) {
            // Row i of d and, below, row j of t as contiguous slices
            let d_row = &d[n * i..n * (i + 1)];
            for (j, res) in r_row.iter_mut().enumerate() {
                let t_row = &t[n * j..n * (j + 1)];
                let mut v = f32::INFINITY;
                for (&x, &y) in d_row.iter().zip(t_row) {
                    let z = x + y;
                    if z < v {
                        v = z;
                    }
                }
                *res = v;
            }
        }
    }
}
