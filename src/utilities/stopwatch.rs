// Stopwatch
// Wall-clock timer read between the last reset and the last lap

use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct StopWatch {
    start: Instant,
    elapsed: Duration,
}

impl Default for StopWatch {
    fn default() -> Self {
        Self::new()
    }
}

impl StopWatch {
    /// Create a stopwatch that starts counting now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    /// Restart from now and clear the recorded lap
    pub fn reset(&mut self) -> &mut Self {
        self.start = Instant::now();
        self.elapsed = Duration::ZERO;
        self
    }

    /// Record the time elapsed since the last reset
    pub fn lap(&mut self) -> &mut Self {
        self.elapsed = self.start.elapsed();
        self
    }

    /// Seconds between the last reset and the last lap
    pub fn watch(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl fmt::Display for StopWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.watch())
    }
}
