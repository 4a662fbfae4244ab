use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Source of monotonic time, in seconds.
///
/// The origin is arbitrary; only differences between two readings are meaningful.
pub trait TimeSource {
    fn now(&self) -> f64;
}

/// Wall-clock time source backed by `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Time source advanced explicitly by the caller.
///
/// Clones share the same reading, so a test can keep one handle and give
/// another to the clock under test.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<f64>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `seconds`. Negative values move it backwards,
    /// which the clock treats as a zero-length frame.
    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
