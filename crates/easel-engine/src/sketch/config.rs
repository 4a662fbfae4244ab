use crate::camera::CameraConfig;

/// Sketch configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SketchConfig {
    /// Forwarded to [`RenderSurface::set_size`](crate::render::RenderSurface::set_size)
    /// on every resize.
    pub update_style: bool,

    /// Parameters of the default camera.
    pub camera: CameraConfig,

    /// Upper bound for a single frame's delta, in seconds. `None` disables clamping.
    pub max_delta: Option<f64>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            update_style: true,
            camera: CameraConfig::default(),
            max_delta: None,
        }
    }
}
