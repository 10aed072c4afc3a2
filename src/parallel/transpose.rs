//! Data layout step run once before any worker starts.
//!
//! The inner scan needs `d[k][j]` for fixed `j`, a strided column walk in
//! row-major storage. Reading `t[j][k]` from the transpose instead walks
//! memory sequentially, so both operands of the kernel stream in order.

use crate::grid::Grid;

/// Return `t` with `t[a][b] == d[b][a]`.
pub fn transpose(d: &Grid) -> Grid {
    let n = d.size();
    let mut t = vec![0.0; n * n];
    for (i, d_row) in d.rows().enumerate() {
        for (j, &x) in d_row.iter().enumerate() {
            t[n * j + i] = x;
        }
    }
    Grid::from_square_buffer(n, t)
}
