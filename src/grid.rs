//! Square grid of `f32` distances.
//!
//! A `Grid` stores an n×n matrix row-major in a single buffer, the same
//! layout the engines slice into rows and row blocks.

use std::fmt;

use rand::Rng;

use crate::error::{Result, ShortcutError};

/// An n×n matrix of `f32` values stored in row-major order.
///
/// Grids handed out by the engines are never mutated afterwards; every
/// accessor here is read-only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    n: usize,
    data: Vec<f32>,
}

impl Grid {
    /// Value returned by [`Grid::entry`] for indices outside the grid.
    pub const OUT_OF_BOUNDS: f32 = -1.0;

    /// An empty 0×0 grid.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a grid from nested rows.
    ///
    /// Fails with [`ShortcutError::InvalidShape`] unless every row has as
    /// many entries as there are rows.
    ///
    /// # Example
    ///
    /// ```
    /// use shortcut::Grid;
    ///
    /// let g = Grid::from_rows(vec![vec![0.0, 1.0], vec![2.0, 0.0]]).unwrap();
    /// assert_eq!(g.size(), 2);
    /// assert_eq!(g.entry(1, 0), 2.0);
    /// ```
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(cell_count(n)?);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(ShortcutError::InvalidShape(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            data.extend(row);
        }
        Ok(Self { n, data })
    }

    /// Build a grid of size `n` from a row-major buffer of `n * n` values.
    pub fn from_vec(n: usize, data: Vec<f32>) -> Result<Self> {
        let cells = cell_count(n)?;
        if data.len() != cells {
            return Err(ShortcutError::InvalidShape(format!(
                "buffer holds {} values, a {}x{} grid needs {}",
                data.len(),
                n,
                n,
                cells
            )));
        }
        Ok(Self { n, data })
    }

    /// Wrap a buffer the engines filled themselves, `data.len() == n * n`.
    pub(crate) fn from_square_buffer(n: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), n * n);
        Self { n, data }
    }

    /// Random grid of size `n` using the thread-local generator.
    ///
    /// See [`Grid::random_with`].
    pub fn random(n: usize) -> Self {
        Self::random_with(n, &mut rand::rng())
    }

    /// Random grid of size `n` with a zero diagonal.
    ///
    /// Off-diagonal entries are arbitrary `i32` values widened to `f32`, so
    /// they may be huge or negative. Intended for benchmarks and fuzzing.
    ///
    /// # Panics
    /// Panics if `n * n` overflows `usize`.
    pub fn random_with<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let cells = match n.checked_mul(n) {
            Some(cells) => cells,
            None => panic!("a {n}x{n} grid does not fit in memory"),
        };
        let mut data = vec![0.0; cells];
        for (i, row) in data.chunks_mut(n.max(1)).enumerate() {
            for (j, x) in row.iter_mut().enumerate() {
                if i != j {
                    *x = rng.random::<i32>() as f32;
                }
            }
        }
        Self { n, data }
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// The whole grid as a row-major slice.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= self.size()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[self.n * i..self.n * (i + 1)]
    }

    /// Iterator over the rows of the grid.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        // chunks(0) panics, an empty grid simply has no rows
        self.data.chunks(self.n.max(1)).take(self.n)
    }

    /// Element at `(i, j)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.n && j < self.n {
            Some(self.data[self.n * i + j])
        } else {
            None
        }
    }

    /// Element at `(i, j)`, or [`Grid::OUT_OF_BOUNDS`] when either index
    /// falls outside the grid. Never panics.
    pub fn entry(&self, i: isize, j: isize) -> f32 {
        match (usize::try_from(i), usize::try_from(j)) {
            (Ok(i), Ok(j)) => self.get(i, j).unwrap_or(Self::OUT_OF_BOUNDS),
            _ => Self::OUT_OF_BOUNDS,
        }
    }

    /// Consume the grid and return its nested rows.
    pub fn into_rows(self) -> Vec<Vec<f32>> {
        self.rows().map(<[f32]>::to_vec).collect()
    }

    /// Consume the grid and return its row-major buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// Number of cells in an n×n grid, `InvalidShape` if it overflows.
fn cell_count(n: usize) -> Result<usize> {
    n.checked_mul(n).ok_or_else(|| {
        ShortcutError::InvalidShape(format!("a {n}x{n} grid overflows usize"))
    })
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut first = true;
            for x in row {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{}", x)?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Grid::from_rows(vec![vec![0.0, 1.0], vec![2.0]]).unwrap_err();
        assert!(matches!(err, ShortcutError::InvalidShape(_)));
    }

    #[test]
    fn from_rows_rejects_rectangular_input() {
        let err = Grid::from_rows(vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]).unwrap_err();
        assert!(matches!(err, ShortcutError::InvalidShape(_)));
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(Grid::from_vec(2, vec![1.0; 4]).is_ok());
        assert!(Grid::from_vec(2, vec![1.0; 5]).is_err());
        assert!(Grid::from_vec(0, vec![]).unwrap().is_empty());
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        // squares to 2^BITS, one past usize::MAX
        let n = 1usize << (usize::BITS / 2);
        let err = Grid::from_vec(n, Vec::new()).unwrap_err();
        assert!(matches!(err, ShortcutError::InvalidShape(_)));
        assert!(Grid::from_vec(usize::MAX, Vec::new()).is_err());
    }

    #[test]
    fn entry_returns_sentinel_out_of_range() {
        let g = Grid::from_rows(vec![vec![0.0, 7.0], vec![3.0, 0.0]]).unwrap();
        assert_eq!(g.entry(0, 1), 7.0);
        assert_eq!(g.entry(2, 0), Grid::OUT_OF_BOUNDS);
        assert_eq!(g.entry(0, -1), Grid::OUT_OF_BOUNDS);
        assert_eq!(g.entry(-5, 1), Grid::OUT_OF_BOUNDS);
        assert_eq!(Grid::empty().entry(0, 0), Grid::OUT_OF_BOUNDS);
        assert_eq!(g.get(1, 2), None);
    }

    #[test]
    fn random_has_zero_diagonal() {
        let mut rng = StdRng::seed_from_u64(7);
        let g = Grid::random_with(17, &mut rng);
        assert_eq!(g.size(), 17);
        for i in 0..17 {
            assert_eq!(g.get(i, i), Some(0.0));
        }
        assert_eq!(Grid::random(0), Grid::empty());
    }

    #[test]
    fn equality_compares_size_and_entries() {
        let a = Grid::from_rows(vec![vec![1.0]]).unwrap();
        let b = Grid::from_vec(1, vec![1.0]).unwrap();
        let c = Grid::from_vec(1, vec![2.0]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Grid::empty());
    }

    #[test]
    fn rows_round_trip_and_display() {
        let rows = vec![vec![0.0, 8.0, 2.0], vec![1.0, 0.0, 9.0], vec![4.0, 5.0, 0.0]];
        let g = Grid::from_rows(rows.clone()).unwrap();
        assert_eq!(g.rows().len(), 3);
        assert_eq!(g.row(1), &[1.0, 0.0, 9.0]);
        assert_eq!(g.to_string(), "0 8 2\n1 0 9\n4 5 0\n");
        assert_eq!(g.into_rows(), rows);
        assert_eq!(Grid::empty().rows().count(), 0);
    }
}
