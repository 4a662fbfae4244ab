//! Render-surface contract and per-frame camera dispatch.
//!
//! The sketch does not rasterize anything itself. It hands the scene and the
//! selected camera to a [`RenderSurface`] supplied by the application.

mod dispatch;
mod surface;

pub use dispatch::{render_with, select_camera, CameraSelection};
pub use surface::RenderSurface;
