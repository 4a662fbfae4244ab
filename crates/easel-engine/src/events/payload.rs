use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::{SurfaceSize, Vec2};
use crate::error::{Result, SketchError};
use crate::time::FrameTime;

use super::bus::EventBus;
use super::kind::EventKind;

/// Event payload.
#[derive(Debug, Clone)]
pub enum Payload {
    Empty,
    /// `update`: timing for the current frame.
    Frame(FrameTime),
    /// `resize`: new surface size in logical pixels.
    Size(SurfaceSize),
    /// `mousemove`: normalized pointer position.
    Pointer(Vec2),
    /// `warning`: a recoverable error absorbed by the frame loop.
    Warning(Rc<SketchError>),
    /// Application-defined data.
    Custom(Rc<dyn Any>),
}

impl Payload {
    pub fn custom<T: Any>(value: T) -> Self {
        Payload::Custom(Rc::new(value))
    }

    pub fn frame(&self) -> Option<FrameTime> {
        match self {
            Payload::Frame(ft) => Some(*ft),
            _ => None,
        }
    }

    pub fn size(&self) -> Option<SurfaceSize> {
        match self {
            Payload::Size(size) => Some(*size),
            _ => None,
        }
    }

    pub fn pointer(&self) -> Option<Vec2> {
        match self {
            Payload::Pointer(p) => Some(*p),
            _ => None,
        }
    }

    pub fn warning(&self) -> Option<&SketchError> {
        match self {
            Payload::Warning(err) => Some(&**err),
            _ => None,
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Payload::Custom(value) => value.downcast_ref(),
            _ => None,
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Empty
    }
}

/// A payload slot reused across emissions.
///
/// `emit_with` rewrites the slot in place and dispatches a borrow of it, so a
/// per-frame event costs no allocation. Handlers must not expect the contents
/// to survive past their own invocation.
///
/// If a handler re-enters the same flyweight (for example a `mousemove`
/// handler that synthesizes another pointer move), the slot is still borrowed
/// by the outer dispatch; the inner emission then falls back to a one-off
/// allocated payload instead of aliasing the slot.
#[derive(Debug, Default)]
pub struct Flyweight {
    slot: RefCell<Payload>,
}

impl Flyweight {
    pub fn new(initial: Payload) -> Self {
        Self {
            slot: RefCell::new(initial),
        }
    }

    /// Rewrites the slot with `fill` and dispatches it to `kind` handlers.
    pub fn emit_with<C>(
        &self,
        bus: &EventBus<C>,
        kind: &EventKind,
        ctx: &C,
        fill: impl FnOnce(&mut Payload),
    ) -> Result<()> {
        match self.slot.try_borrow_mut() {
            Ok(mut slot) => fill(&mut *slot),
            Err(_) => {
                log::debug!("re-entrant {kind} emission; allocating a payload");
                let mut payload = self.snapshot();
                fill(&mut payload);
                return bus.emit(kind, &payload, ctx);
            }
        }

        let slot = self.slot.borrow();
        bus.emit(kind, &*slot, ctx)
    }

    /// Clones the current slot contents.
    pub fn snapshot(&self) -> Payload {
        self.slot.borrow().clone()
    }
}
