use std::cell::RefCell;

use super::{CallbackQueue, FrameCallback, FrameScheduler, FrameToken};

/// Scheduler driven by explicit `step()` calls.
///
/// Each step runs the callbacks that were pending when it started. Callbacks
/// requested while a step is running wait for the next step, matching how a
/// display's next-frame primitive behaves.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    queue: RefCell<CallbackQueue>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one frame. Returns the number of callbacks run.
    pub fn step(&self) -> usize {
        let batch = self.queue.borrow_mut().take();
        let count = batch.len();
        for (_, callback) in batch {
            callback();
        }
        count
    }

    /// Runs `frames` frames. Returns the total number of callbacks run.
    pub fn step_n(&self, frames: usize) -> usize {
        (0..frames).map(|_| self.step()).sum()
    }

    /// Number of callbacks waiting for the next step.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request(&self, callback: FrameCallback) -> FrameToken {
        self.queue.borrow_mut().push(callback)
    }

    fn cancel(&self, token: FrameToken) {
        self.queue.borrow_mut().cancel(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn step_runs_pending_callbacks_in_order() {
        let sched = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = log.clone();
            sched.request(Box::new(move || log.borrow_mut().push(i)));
        }
        assert_eq!(sched.pending(), 3);
        assert_eq!(sched.step(), 3);
        assert_eq!(*log.borrow(), [0, 1, 2]);
        assert_eq!(sched.step(), 0);
    }

    #[test]
    fn cancelled_callbacks_never_run() {
        let sched = ManualScheduler::new();
        let ran = Rc::new(Cell::new(false));
        let token = {
            let ran = ran.clone();
            sched.request(Box::new(move || ran.set(true)))
        };
        sched.cancel(token);
        assert_eq!(sched.step(), 0);
        assert!(!ran.get());
    }

    #[test]
    fn requests_made_during_a_step_wait_for_the_next() {
        let sched = Rc::new(ManualScheduler::new());
        let count = Rc::new(Cell::new(0));

        fn schedule(sched: &Rc<ManualScheduler>, count: &Rc<Cell<u32>>) {
            let (s, c) = (Rc::downgrade(sched), count.clone());
            sched.request(Box::new(move || {
                c.set(c.get() + 1);
                if let Some(s) = s.upgrade() {
                    schedule(&s, &c);
                }
            }));
        }

        schedule(&sched, &count);
        sched.step();
        assert_eq!(count.get(), 1);
        assert_eq!(sched.pending(), 1);
        sched.step_n(4);
        assert_eq!(count.get(), 5);
    }
}
