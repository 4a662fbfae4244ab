use std::cell::RefCell;

use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::window::{Window, WindowId};

use crate::coords::{Vec2, Viewport};
use crate::host::{Host, HostEvent, HostListener, ListenerId, Listeners};
use crate::schedule::{CallbackQueue, FrameCallback, FrameScheduler, FrameToken};

/// A winit window acting as both [`Host`] and [`FrameScheduler`].
///
/// Frame requests are queued and turned into a redraw request; the runtime
/// calls [`WinitHost::run_frame`] when the window reports `RedrawRequested`.
pub struct WinitHost {
    window: Window,
    listeners: Listeners,
    frames: RefCell<CallbackQueue>,
}

impl WinitHost {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            listeners: Listeners::new(),
            frames: RefCell::new(CallbackQueue::new()),
        }
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Runs the frame callbacks pending when the call starts.
    ///
    /// Returns the number of callbacks run.
    pub fn run_frame(&self) -> usize {
        let batch = self.frames.borrow_mut().take();
        let count = batch.len();
        for (_, callback) in batch {
            callback();
        }
        count
    }

    /// Forwards a host notification to the attached listeners.
    pub fn dispatch(&self, event: &HostEvent) {
        self.listeners.dispatch(event);
    }

    /// Converts a physical cursor position to logical surface coordinates.
    pub fn to_logical(&self, position: PhysicalPosition<f64>) -> Vec2 {
        let logical = position.to_logical::<f64>(self.window.scale_factor());
        Vec2::new(logical.x, logical.y)
    }
}

impl Host for WinitHost {
    fn viewport(&self) -> Viewport {
        let scale = self.window.scale_factor();
        let size: LogicalSize<f64> = self.window.inner_size().to_logical(scale);
        Viewport::new(size.width.round() as u32, size.height.round() as u32, scale)
    }

    fn add_listener(&self, listener: HostListener) -> ListenerId {
        self.listeners.add(listener)
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.remove(id);
    }
}

impl FrameScheduler for WinitHost {
    fn request(&self, callback: FrameCallback) -> FrameToken {
        let token = self.frames.borrow_mut().push(callback);
        self.window.request_redraw();
        token
    }

    fn cancel(&self, token: FrameToken) {
        self.frames.borrow_mut().cancel(token);
    }
}

impl std::fmt::Debug for WinitHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WinitHost")
            .field("window", &self.window.id())
            .field("listeners", &self.listeners)
            .field("frames", &self.frames.borrow().len())
            .finish()
    }
}
