//! Desktop runtime.
//!
//! Owns the `winit` EventLoop and Window and exposes the window to sketches as
//! a [`Host`](crate::host::Host) plus [`FrameScheduler`](crate::schedule::FrameScheduler).

mod host;
mod runtime;

pub use host::WinitHost;
pub use runtime::{Runtime, RuntimeConfig};
