/// Host viewport geometry read at each resize notification.
///
/// `width`/`height` are logical pixels; `pixel_density` is the number of
/// physical pixels per logical pixel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_density: f64,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32, pixel_density: f64) -> Self {
        Self { width, height, pixel_density }
    }

    /// Pixel density to hand to the surface. Hosts that report nothing usable
    /// (zero, negative, NaN) get 1.
    #[inline]
    pub fn density_or_default(self) -> f64 {
        if self.pixel_density.is_finite() && self.pixel_density > 0.0 {
            self.pixel_density
        } else {
            1.0
        }
    }

    #[inline]
    pub fn size(self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 0, 1.0)
    }
}

/// Render-surface size in logical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `width / height`, or `None` for a zero height.
    #[inline]
    pub fn aspect(self) -> Option<f64> {
        (self.height > 0).then(|| self.width as f64 / self.height as f64)
    }
}
