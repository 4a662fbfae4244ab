use super::source::{MonotonicTime, TimeSource};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous sample, in seconds. Never negative.
    pub delta: f64,

    /// Total running time, in seconds.
    pub elapsed: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Running-time accumulator.
///
/// Elapsed time only grows while the clock is running and always equals the
/// sum of the deltas handed out (plus whatever `stop()` folded in).
///
/// Delta time may optionally be clamped from above to avoid pathological values
/// when the application is paused by the debugger, minimized, or stalls.
pub struct Clock {
    source: Box<dyn TimeSource>,
    running: bool,
    last: f64,
    elapsed: f64,
    frame_index: u64,
    max_delta: Option<f64>,
}

impl Clock {
    /// Creates a stopped clock reading wall-clock time.
    pub fn new() -> Self {
        Self::with_source(MonotonicTime::new())
    }

    /// Creates a stopped clock reading from `source`.
    pub fn with_source(source: impl TimeSource + 'static) -> Self {
        let source: Box<dyn TimeSource> = Box::new(source);
        let last = source.now();
        Self {
            source,
            running: false,
            last,
            elapsed: 0.0,
            frame_index: 0,
            max_delta: None,
        }
    }

    /// Caps every sampled delta at `max_delta` seconds.
    pub fn with_max_delta(mut self, max_delta: Option<f64>) -> Self {
        debug_assert!(max_delta.is_none_or(|m| m >= 0.0));
        self.max_delta = max_delta;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts the clock and moves the delta baseline to now.
    pub fn start(&mut self) {
        self.last = self.source.now();
        self.running = true;
    }

    /// Stops the clock, keeping the running time accumulated since the last sample.
    pub fn stop(&mut self) {
        if self.running {
            let now = self.source.now();
            self.elapsed += self.clamp(now - self.last);
            self.last = now;
        }
        self.running = false;
    }

    /// Zeroes elapsed time and the frame counter.
    ///
    /// The delta baseline is left alone: the next `delta()` still spans back
    /// to the previous sample.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.frame_index = 0;
    }

    /// Total running time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Seconds since the previous `delta()`/`start()`.
    ///
    /// Only meaningful while running.
    pub fn delta(&mut self) -> f64 {
        let now = self.source.now();
        let delta = self.clamp(now - self.last);
        self.last = now;
        self.elapsed += delta;
        self.frame_index = self.frame_index.wrapping_add(1);
        delta
    }

    /// Samples the clock and returns the full snapshot for this frame.
    pub fn tick(&mut self) -> FrameTime {
        let frame_index = self.frame_index;
        let delta = self.delta();
        FrameTime {
            delta,
            elapsed: self.elapsed,
            frame_index,
        }
    }

    fn clamp(&self, delta: f64) -> f64 {
        // Time sources are allowed to step backwards (manual time, clock adjustments).
        let delta = delta.max(0.0);
        match self.max_delta {
            Some(max) => delta.min(max),
            None => delta,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clock")
            .field("running", &self.running)
            .field("elapsed", &self.elapsed)
            .field("frame_index", &self.frame_index)
            .field("max_delta", &self.max_delta)
            .finish()
    }
}
