use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{Result, SketchError};

use super::kind::EventKind;
use super::payload::Payload;

/// Return type of event handlers.
pub type HandlerResult = anyhow::Result<()>;

type Handler<C> = dyn Fn(&Payload, &C) -> HandlerResult;

/// Handle returned by [`EventBus::on`]; pass it to [`EventBus::off`] to unsubscribe.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Subscription(u64);

struct Entry<C> {
    id: u64,
    kind: EventKind,
    once: bool,
    handler: Rc<Handler<C>>,
}

/// Synchronous event bus.
///
/// Handlers run in registration order on the emitting thread, each receiving the
/// same payload and the context `C` passed to `emit`. The handler list is
/// snapshotted when an emission starts:
/// - handlers added during an emission are first called by the next one
/// - handlers removed during an emission are skipped if they have not run yet
///
/// A failing handler does not stop dispatch. The remaining handlers still run
/// and the first error is returned once all of them have been attempted.
pub struct EventBus<C> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<Entry<C>>>,
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Registers `handler` for `kind`.
    pub fn on<F>(&self, kind: impl Into<EventKind>, handler: F) -> Subscription
    where
        F: Fn(&Payload, &C) -> HandlerResult + 'static,
    {
        self.insert(kind.into(), false, Rc::new(handler))
    }

    /// Registers `handler` for the next `kind` emission only.
    pub fn once<F>(&self, kind: impl Into<EventKind>, handler: F) -> Subscription
    where
        F: Fn(&Payload, &C) -> HandlerResult + 'static,
    {
        self.insert(kind.into(), true, Rc::new(handler))
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn off(&self, subscription: Subscription) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|e| e.id != subscription.0);
        entries.len() != before
    }

    /// Removes every subscription.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Number of handlers currently registered for `kind`.
    pub fn handler_count(&self, kind: &EventKind) -> usize {
        self.entries.borrow().iter().filter(|e| &e.kind == kind).count()
    }

    /// Dispatches `payload` to every handler registered for `kind`.
    pub fn emit(&self, kind: &EventKind, payload: &Payload, ctx: &C) -> Result<()> {
        // No borrow of `entries` may be held while handlers run: they are free
        // to call `on`/`off`/`emit` on this bus.
        let snapshot: Vec<(u64, bool, Rc<Handler<C>>)> = self
            .entries
            .borrow()
            .iter()
            .filter(|e| &e.kind == kind)
            .map(|e| (e.id, e.once, Rc::clone(&e.handler)))
            .collect();

        let mut first_error: Option<anyhow::Error> = None;

        for (id, once, handler) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            if once {
                self.off(Subscription(id));
            }

            if let Err(err) = handler(payload, ctx) {
                if first_error.is_none() {
                    first_error = Some(err);
                } else {
                    log::warn!("additional {kind} handler error: {err:#}");
                }
            }
        }

        match first_error {
            Some(err) => Err(SketchError::Handler(err)),
            None => Ok(()),
        }
    }

    fn insert(&self, kind: EventKind, once: bool, handler: Rc<Handler<C>>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push(Entry { id, kind, once, handler });
        Subscription(id)
    }

    fn is_registered(&self, id: u64) -> bool {
        self.entries.borrow().iter().any(|e| e.id == id)
    }
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}
