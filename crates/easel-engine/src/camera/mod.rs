//! Cameras and the active-camera slot.
//!
//! Anything that implements [`Camera`] can render the scene. The sketch keeps
//! an active-camera slot holding a [`CameraRef`]; the application may put any
//! shared object there, including one that is not a camera at all, in which
//! case the render dispatcher falls back to the sketch's default camera.

mod perspective;
mod slot;

pub use perspective::{CameraConfig, PerspectiveCamera};
pub use slot::CameraRef;

/// Projection contract required by render surfaces.
pub trait Camera {
    fn aspect(&self) -> f64;

    fn set_aspect(&mut self, aspect: f64);

    /// Recomputes the projection after parameters changed.
    fn update_projection(&mut self);

    /// Column-major projection matrix as of the last `update_projection`.
    fn projection(&self) -> [[f64; 4]; 4];
}
