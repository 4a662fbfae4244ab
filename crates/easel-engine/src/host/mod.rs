//! Host environment hooks.
//!
//! A host is whatever embeds the sketch: a desktop window, a test harness, an
//! offscreen renderer. It reports viewport geometry on demand and notifies
//! registered listeners of resizes and pointer moves as they happen.

mod listeners;
mod manual;

use std::rc::Rc;

use crate::coords::{Vec2, Viewport};

pub use listeners::{ListenerId, Listeners};
pub use manual::ManualHost;

/// Notification delivered to host listeners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HostEvent {
    /// The viewport changed; read the new geometry from [`Host::viewport`].
    Resized,
    /// Pointer moved, in surface-relative logical pixels (origin top-left).
    PointerMoved(Vec2),
}

pub type HostListener = Rc<dyn Fn(&HostEvent)>;

pub trait Host {
    /// Current viewport geometry.
    fn viewport(&self) -> Viewport;

    fn add_listener(&self, listener: HostListener) -> ListenerId;

    /// Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}
