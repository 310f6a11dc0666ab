//! Wall-time sampling for the frame loop.

use instant::{Duration, Instant};

/// Measures the wall time that passed between two samples.
///
/// The clock starts when it is created. Every call to [`delta`](Self::delta)
/// returns the time since the previous call (or since the last reset) and moves
/// the reference point forward, so consecutive deltas add up to the total
/// elapsed time.
#[derive(Debug, Clone)]
pub struct Clock {
    started: Instant,
    last_sample: Instant,
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_sample: now,
        }
    }

    /// Time since the previous sample.
    pub fn delta(&mut self) -> Duration {
        let now = Instant::now();
        let dt = if now > self.last_sample {
            now - self.last_sample
        } else {
            Duration::ZERO
        };
        self.last_sample = now;
        dt
    }

    /// Total time since the clock was created or last reset.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
