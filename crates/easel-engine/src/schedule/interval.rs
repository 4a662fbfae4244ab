use std::cell::{Cell, RefCell};

use crate::time::{MonotonicTime, TimeSource};

use super::{CallbackQueue, FrameCallback, FrameScheduler, FrameToken};

/// Fixed-interval scheduler for hosts without a display-synced primitive.
///
/// The host calls [`poll`](Self::poll) from its own loop; pending callbacks run
/// once at least `interval` seconds have passed since the previous firing.
pub struct IntervalScheduler {
    interval: f64,
    source: Box<dyn TimeSource>,
    last_fire: Cell<Option<f64>>,
    queue: RefCell<CallbackQueue>,
}

impl IntervalScheduler {
    /// Creates a scheduler firing every `interval` seconds of wall-clock time.
    pub fn new(interval: f64) -> Self {
        Self::with_source(interval, MonotonicTime::new())
    }

    /// Creates a scheduler firing roughly `hz` times per second.
    pub fn with_rate(hz: f64) -> Self {
        Self::new(1.0 / hz)
    }

    pub fn with_source(interval: f64, source: impl TimeSource + 'static) -> Self {
        debug_assert!(interval >= 0.0);
        Self {
            interval,
            source: Box::new(source),
            last_fire: Cell::new(None),
            queue: RefCell::new(CallbackQueue::new()),
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Seconds until the next firing is due, zero if it already is.
    pub fn time_until_due(&self) -> f64 {
        match self.last_fire.get() {
            Some(last) => (last + self.interval - self.source.now()).max(0.0),
            None => 0.0,
        }
    }

    /// Fires pending callbacks if the interval has elapsed. Returns the number run.
    pub fn poll(&self) -> usize {
        if self.queue.borrow().is_empty() || self.time_until_due() > 0.0 {
            return 0;
        }

        self.last_fire.set(Some(self.source.now()));
        let batch = self.queue.borrow_mut().take();
        let count = batch.len();
        for (_, callback) in batch {
            callback();
        }
        count
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request(&self, callback: FrameCallback) -> FrameToken {
        self.queue.borrow_mut().push(callback)
    }

    fn cancel(&self, token: FrameToken) {
        self.queue.borrow_mut().cancel(token);
    }
}
