use std::cell::Cell;

use crate::coords::{Vec2, Viewport};

use super::{Host, HostEvent, HostListener, ListenerId, Listeners};

/// Host whose viewport and pointer are driven by the caller.
#[derive(Debug)]
pub struct ManualHost {
    viewport: Cell<Viewport>,
    listeners: Listeners,
}

impl ManualHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Cell::new(viewport),
            listeners: Listeners::new(),
        }
    }

    /// Changes the viewport size and notifies listeners.
    pub fn resize(&self, width: u32, height: u32) {
        let mut viewport = self.viewport.get();
        viewport.width = width;
        viewport.height = height;
        self.viewport.set(viewport);
        self.listeners.dispatch(&HostEvent::Resized);
    }

    /// Changes the pixel density and notifies listeners.
    pub fn set_pixel_density(&self, pixel_density: f64) {
        let mut viewport = self.viewport.get();
        viewport.pixel_density = pixel_density;
        self.viewport.set(viewport);
        self.listeners.dispatch(&HostEvent::Resized);
    }

    /// Reports a pointer move at raw surface coordinates.
    pub fn move_pointer(&self, x: f64, y: f64) {
        self.listeners.dispatch(&HostEvent::PointerMoved(Vec2::new(x, y)));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Total listener registrations, including ones since removed.
    pub fn registrations(&self) -> u64 {
        self.listeners.registrations()
    }
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new(Viewport::new(800, 600, 1.0))
    }
}

impl Host for ManualHost {
    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn add_listener(&self, listener: HostListener) -> ListenerId {
        self.listeners.add(listener)
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.remove(id);
    }
}
