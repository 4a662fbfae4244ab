use crate::coords::{SurfaceSize, Vec2};
use crate::error::{Result, SketchError};

/// Maps a raw surface-relative pointer position into [-1, 1] on both axes.
///
/// `x` grows rightward and `y` grows upward, so the top-left corner of the
/// surface maps to `(-1, 1)` and the bottom-right corner to `(1, -1)`.
/// Positions outside the surface map outside the range; they are not clamped.
pub fn normalize_pointer(raw: Vec2, size: SurfaceSize) -> Result<Vec2> {
    if size.is_empty() {
        return Err(SketchError::InvalidSurfaceSize {
            width: size.width,
            height: size.height,
        });
    }

    let width = size.width as f64;
    let height = size.height as f64;

    Ok(Vec2::new(
        2.0 * (raw.x / width) - 1.0,
        2.0 * (1.0 - raw.y / height) - 1.0,
    ))
}
