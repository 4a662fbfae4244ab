//! Easel engine crate.
//!
//! A [`Sketch`] drives a render loop: it keeps time, emits lifecycle and input
//! events to registered handlers, keeps the render surface and default camera
//! in step with the host viewport, and renders the scene once per frame.
//!
//! Hosts and frame schedulers are injected, so the same sketch runs inside a
//! `winit` window ([`window::Runtime`]) or under a test harness stepping frames
//! by hand.

pub mod camera;
pub mod coords;
pub mod events;
pub mod host;
pub mod input;
pub mod render;
pub mod schedule;
pub mod time;
pub mod window;

pub mod logging;
pub mod sketch;

mod error;

pub use error::{Result, SketchError};
pub use events::{EventKind, Payload};
pub use sketch::{Sketch, SketchBuilder, SketchConfig, SketchState, WeakSketch};
