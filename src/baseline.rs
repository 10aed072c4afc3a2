//! Reference implementation: the plain triple loop.

use crate::grid::Grid;

/// Compute the shortcut matrix `r[i][j] = min_k (d[i][k] + d[k][j])`
/// without any optimizations.
///
/// Reads `d[k][j]` column-wise, which is what the parallel engine's
/// transpose step avoids. Serves as the correctness oracle.
pub fn baseline_compute(d: &Grid) -> Grid {
    let n = d.size();
    let d = d.as_slice();
    let mut r = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            let mut v = f32::INFINITY;
            for k in 0..n {
                let x = d[n * i + k];
                let y = d[n * k + j];
                let z = x + y;
                if z < v {
                    v = z;
                }
            }
            r[n * i + j] = v;
        }
    }
    Grid::from_square_buffer(n, r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_by_three() {
        let d = Grid::from_rows(vec![
            vec![0.0, 8.0, 2.0],
            vec![1.0, 0.0, 9.0],
            vec![4.0, 5.0, 0.0],
        ])
        .unwrap();
        let expected = Grid::from_rows(vec![
            vec![0.0, 7.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![4.0, 5.0, 0.0],
        ])
        .unwrap();
        assert_eq!(baseline_compute(&d), expected);
    }

    #[test]
    fn degenerate_sizes() {
        assert_eq!(baseline_compute(&Grid::empty()), Grid::empty());
        let one = Grid::from_vec(1, vec![-2.5]).unwrap();
        assert_eq!(baseline_compute(&one).as_slice(), &[-5.0]);
    }

    #[test]
    fn negative_entries_are_not_clamped() {
        let d = Grid::from_rows(vec![vec![0.0, -4.0], vec![-1.0, 0.0]]).unwrap();
        let r = baseline_compute(&d);
        assert_eq!(r.as_slice(), &[-5.0, -4.0, -1.0, -5.0]);
    }
}
