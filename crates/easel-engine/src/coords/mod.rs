//! Coordinate and size types shared by the sketch and its collaborators.
//!
//! Raw host space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Normalized pointer space:
//! - [-1, 1] on both axes
//! - +X right, +Y up

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::{SurfaceSize, Viewport};
