use super::Camera;

/// Perspective camera parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view, in degrees.
    pub fov: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Right-handed perspective camera with a clip-space depth range of [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    projection: [[f64; 4]; 4],
    projection_updates: u64,
}

impl PerspectiveCamera {
    pub fn new(fov: f64, aspect: f64, near: f64, far: f64) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            projection: [[0.0; 4]; 4],
            projection_updates: 0,
        };
        camera.update_projection();
        camera.projection_updates = 0;
        camera
    }

    pub fn from_config(config: CameraConfig, aspect: f64) -> Self {
        Self::new(config.fov, aspect, config.near, config.far)
    }

    /// How many times the projection was recomputed since construction.
    pub fn projection_updates(&self) -> u64 {
        self.projection_updates
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_config(CameraConfig::default(), 1.0)
    }
}

impl Camera for PerspectiveCamera {
    fn aspect(&self) -> f64 {
        self.aspect
    }

    fn set_aspect(&mut self, aspect: f64) {
        self.aspect = aspect;
    }

    fn update_projection(&mut self) {
        let f = 1.0 / (self.fov.to_radians() * 0.5).tan();
        let range = self.near - self.far;

        self.projection = [
            [f / self.aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (self.far + self.near) / range, -1.0],
            [0.0, 0.0, 2.0 * self.far * self.near / range, 0.0],
        ];
        self.projection_updates += 1;
    }

    fn projection(&self) -> [[f64; 4]; 4] {
        self.projection
    }
}
