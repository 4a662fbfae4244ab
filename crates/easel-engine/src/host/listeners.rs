use std::cell::{Cell, RefCell};

use super::{HostEvent, HostListener};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

/// Listener registry shared by host implementations.
#[derive(Default)]
pub struct Listeners {
    next: Cell<u64>,
    registered: Cell<u64>,
    entries: RefCell<Vec<(ListenerId, HostListener)>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: HostListener) -> ListenerId {
        let id = ListenerId(self.next.get());
        self.next.set(id.0 + 1);
        self.registered.set(self.registered.get() + 1);
        self.entries.borrow_mut().push((id, listener));
        id
    }

    pub fn remove(&self, id: ListenerId) {
        self.entries.borrow_mut().retain(|(i, _)| *i != id);
    }

    /// Listeners currently attached.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Total `add` calls over the registry's lifetime.
    pub fn registrations(&self) -> u64 {
        self.registered.get()
    }

    /// Delivers `event` to every listener attached when the call starts.
    pub fn dispatch(&self, event: &HostEvent) {
        let snapshot: Vec<HostListener> =
            self.entries.borrow().iter().map(|(_, l)| l.clone()).collect();
        for listener in snapshot {
            listener(event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("attached", &self.len())
            .field("registrations", &self.registrations())
            .finish()
    }
}
