use std::rc::Rc;

use crate::error::{Result, SketchError};
use crate::events::{EventKind, Payload};
use crate::render::RenderSurface;

use super::{Sketch, SketchState};

impl<R: RenderSurface + 'static> Sketch<R> {
    /// Starts the render loop.
    ///
    /// Arms the clock, runs one resize pass so the first frame sees correct
    /// geometry, registers host hooks, emits `start` and schedules the first
    /// frame. Fails with [`SketchError::AlreadyRunning`] if already running.
    ///
    /// Handler errors raised by the `resize`/`start` emissions do not undo the
    /// start; the first one is returned after the loop is up.
    pub fn start(&self) -> Result<()> {
        let epoch = {
            let mut lifecycle = self.inner.lifecycle.borrow_mut();
            if lifecycle.state == SketchState::Running {
                return Err(SketchError::AlreadyRunning);
            }
            lifecycle.state = SketchState::Running;
            lifecycle.epoch += 1;
            lifecycle.epoch
        };
        log::debug!("sketch starting (run {epoch})");

        self.inner.clock.borrow_mut().start();

        let mut first_error = None;
        keep_first(&mut first_error, self.resize_pass());

        // Any handler above may have stopped (or restarted) the sketch; only
        // carry on while this run is still the current one.
        if self.is_current(epoch) {
            let listener = self.inner.host.add_listener(self.host_listener());
            self.inner.lifecycle.borrow_mut().listener = Some(listener);
        }

        if self.is_current(epoch) {
            keep_first(
                &mut first_error,
                self.inner.bus.emit(&EventKind::Start, &Payload::Empty, self),
            );
        }

        if self.is_current(epoch) {
            self.schedule_frame(epoch);
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Stops the render loop. Does nothing when already idle.
    ///
    /// Once this returns no scheduled frame of the stopped run will act, even
    /// one the scheduler has already dequeued.
    pub fn stop(&self) -> Result<()> {
        let (listener, pending) = {
            let mut lifecycle = self.inner.lifecycle.borrow_mut();
            if lifecycle.state == SketchState::Idle {
                return Ok(());
            }
            lifecycle.state = SketchState::Idle;
            (lifecycle.listener.take(), lifecycle.pending.take())
        };

        if let Some(listener) = listener {
            self.inner.host.remove_listener(listener);
        }
        if let Some(token) = pending {
            self.inner.scheduler.cancel(token);
        }
        self.inner.clock.borrow_mut().stop();
        log::debug!("sketch stopped at t={:.3}s", self.time());

        self.inner.bus.emit(&EventKind::Stop, &Payload::Empty, self)
    }

    fn is_current(&self, epoch: u64) -> bool {
        let lifecycle = self.inner.lifecycle.borrow();
        lifecycle.state == SketchState::Running && lifecycle.epoch == epoch
    }

    fn schedule_frame(&self, epoch: u64) {
        let weak = Rc::downgrade(&self.inner);
        let token = self.inner.scheduler.request(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                Sketch { inner }.tick(epoch);
            }
        }));
        self.inner.lifecycle.borrow_mut().pending = Some(token);
    }

    /// One frame: sample time, emit `update`, render, schedule the next frame.
    ///
    /// Errors are logged, never returned: a frame that bails out early would
    /// leave the loop without a next frame.
    fn tick(&self, epoch: u64) {
        {
            let mut lifecycle = self.inner.lifecycle.borrow_mut();
            if lifecycle.state != SketchState::Running || lifecycle.epoch != epoch {
                log::trace!("ignoring frame from stale run {epoch}");
                return;
            }
            lifecycle.pending = None;
        }

        let frame = self.inner.clock.borrow_mut().tick();
        let emitted = self.inner.update_payload.emit_with(
            &self.inner.bus,
            &EventKind::Update,
            self,
            |payload| *payload = Payload::Frame(frame),
        );
        if let Err(err) = emitted {
            log::error!("update handler failed on frame {}: {err}", frame.frame_index);
        }

        if let Err(err) = self.render_pass() {
            log::error!("render failed on frame {}: {err:#}", frame.frame_index);
        }

        if self.is_current(epoch) {
            self.schedule_frame(epoch);
        } else {
            log::trace!("sketch stopped during frame {}", frame.frame_index);
        }
    }
}

fn keep_first(first: &mut Option<SketchError>, result: Result<()>) {
    if let Err(err) = result {
        if first.is_none() {
            *first = Some(err);
        } else {
            log::warn!("additional start error: {err}");
        }
    }
}
