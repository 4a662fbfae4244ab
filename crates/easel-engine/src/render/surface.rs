use crate::camera::Camera;
use crate::coords::SurfaceSize;

/// External render target driven by the sketch.
///
/// Implementations must not call back into the sketch from these methods.
pub trait RenderSurface {
    /// Scene-graph root handed to `render`.
    type Scene;

    /// Resizes the target to `width`x`height` logical pixels.
    ///
    /// `update_style` asks the surface to also resize its presentation (for
    /// example a window or canvas element), not only the backing buffer.
    fn set_size(&mut self, width: u32, height: u32, update_style: bool);

    fn set_pixel_density(&mut self, density: f64);

    /// Current size in logical pixels.
    fn size(&self) -> SurfaceSize;

    fn render(&mut self, scene: &Self::Scene, camera: &dyn Camera) -> anyhow::Result<()>;
}
