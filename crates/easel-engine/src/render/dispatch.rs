use std::cell::RefCell;
use std::rc::Rc;

use anyhow::anyhow;

use crate::camera::{Camera, CameraRef, PerspectiveCamera};

use super::RenderSurface;

/// Camera chosen for one frame.
#[derive(Clone)]
pub struct CameraSelection {
    pub camera: Rc<RefCell<dyn Camera>>,
    /// `true` when the active slot was unusable and the default camera stands in.
    pub fallback: bool,
}

/// Picks the camera for this frame.
///
/// The active slot is used when it holds a camera that is not currently
/// mutably borrowed. Otherwise the default camera is returned with
/// `fallback` set; the slot itself is left untouched.
///
/// A slot holding the default camera is never a fallback, busy or not:
/// substituting the same camera cannot help, so the borrow conflict is left
/// for [`render_with`] to report.
pub fn select_camera(
    active: Option<&CameraRef>,
    default: &Rc<RefCell<PerspectiveCamera>>,
) -> CameraSelection {
    if let Some(slot) = active {
        if let Some(camera) = slot.as_camera() {
            if slot.is(default) || camera.try_borrow().is_ok() {
                return CameraSelection {
                    camera: Rc::clone(camera),
                    fallback: false,
                };
            }
        }
    }

    let camera: Rc<RefCell<dyn Camera>> = default.clone();
    CameraSelection {
        camera,
        fallback: true,
    }
}

/// Renders `scene` through `camera`.
pub fn render_with<R: RenderSurface>(
    surface: &mut R,
    scene: &R::Scene,
    camera: &Rc<RefCell<dyn Camera>>,
) -> anyhow::Result<()> {
    let camera = camera
        .try_borrow()
        .map_err(|_| anyhow!("camera is mutably borrowed during render"))?;
    surface.render(scene, &*camera)
}
