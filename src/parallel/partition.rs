//! Splitting output rows between workers.

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::thread;

/// Half-open interval `[start, end)` of row indices owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkRange {
    pub start: usize,
    pub end: usize,
}

impl WorkRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for WorkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Hardware parallelism hint, 1 if it cannot be determined.
pub fn available_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Number of workers to use for a grid of size `n` given a parallelism
/// hint: never more workers than rows, zero for an empty grid.
pub fn worker_count(n: usize, hint: usize) -> usize {
    if n == 0 {
        0
    } else {
        n.min(hint.max(1))
    }
}

/// Partition rows `[0, n)` into `workers` contiguous ranges.
///
/// Every range holds `n / workers` rows except the last one, which also
/// takes the remaining `n % workers` rows. With `workers >= n` every
/// worker gets exactly one row. Returns no ranges when `n` or `workers`
/// is zero.
///
/// ```
/// use shortcut::parallel::{partition, WorkRange};
///
/// let ranges = partition(10, 3);
/// assert_eq!(
///     ranges,
///     vec![WorkRange::new(0, 3), WorkRange::new(3, 6), WorkRange::new(6, 10)]
/// );
/// ```
pub fn partition(n: usize, workers: usize) -> Vec<WorkRange> {
    let workers = workers.min(n);
    if workers == 0 {
        return Vec::new();
    }
    let per_worker = n / workers;
    (0..workers)
        .map(|w| {
            let start = w * per_worker;
            let end = if w == workers - 1 { n } else { start + per_worker };
            WorkRange::new(start, end)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_exact_cover(n: usize, ranges: &[WorkRange]) {
        let mut next = 0;
        for range in ranges {
            assert_eq!(range.start, next, "gap or overlap before {}", range);
            assert!(!range.is_empty(), "empty range {}", range);
            next = range.end;
        }
        assert_eq!(next, n);
    }

    #[test]
    fn remainder_goes_to_last_worker() {
        let ranges = partition(11, 4);
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[3], WorkRange::new(6, 11));
        assert_eq!(ranges[3].len(), 5);
        assert_exact_cover(11, &ranges);
    }

    #[test]
    fn more_workers_than_rows() {
        let ranges = partition(3, 8);
        assert_eq!(
            ranges,
            vec![WorkRange::new(0, 1), WorkRange::new(1, 2), WorkRange::new(2, 3)]
        );
    }

    #[test]
    fn empty_inputs() {
        assert!(partition(0, 4).is_empty());
        assert!(partition(5, 0).is_empty());
        assert_eq!(worker_count(0, 16), 0);
    }

    #[test]
    fn worker_count_is_capped_by_rows() {
        assert_eq!(worker_count(3, 16), 3);
        assert_eq!(worker_count(100, 16), 16);
        assert_eq!(worker_count(100, 0), 1);
        assert!(available_workers() >= 1);
    }

    #[test]
    fn every_worker_count_covers_all_rows() {
        for n in 1..=64 {
            for w in 1..=n {
                let ranges = partition(n, w);
                assert_eq!(ranges.len(), w);
                assert_exact_cover(n, &ranges);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_partition_is_exact_cover(n in 1usize..5000, w in 1usize..256) {
            let ranges = partition(n, worker_count(n, w));
            let covered: usize = ranges.iter().map(WorkRange::len).sum();
            prop_assert_eq!(covered, n);
            prop_assert_eq!(ranges.first().map(|r| r.start), Some(0));
            prop_assert_eq!(ranges.last().map(|r| r.end), Some(n));
            for pair in ranges.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
        }
    }
}
