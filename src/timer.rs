//! Wall-clock lap timer for the benchmark driver.

use std::time::{Duration, Instant};

use tracing::info;

/// Records instants on every `click` and reports the time between them.
///
/// ```
/// use shortcut::timer::Stopwatch;
///
/// let mut s = Stopwatch::new();
/// s.click();
/// // ... do work ...
/// s.click();
/// assert_eq!(s.laps().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Stopwatch {
    instants: Vec<Instant>,
}

impl Stopwatch {
    pub fn new() -> Stopwatch {
        Stopwatch::default()
    }

    pub fn click(&mut self) {
        self.instants.push(Instant::now());
    }

    /// Durations between consecutive clicks.
    pub fn laps(&self) -> Vec<Duration> {
        self.instants
            .windows(2)
            .map(|w| w[1].duration_since(w[0]))
            .collect()
    }

    /// Time from the first to the last click.
    pub fn total(&self) -> Duration {
        match (self.instants.first(), self.instants.last()) {
            (Some(first), Some(last)) => last.duration_since(*first),
            _ => Duration::ZERO,
        }
    }

    pub fn report(&self, label: &str) {
        for (i, elapsed) in self.laps().into_iter().enumerate() {
            info!(label, lap = i, elapsed_ms = elapsed.as_secs_f64() * 1e3, "{}-{}", i, i + 1);
        }
    }
}
