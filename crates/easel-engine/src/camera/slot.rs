use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::Camera;

/// Shared, non-owning reference stored in the active-camera slot.
///
/// `Camera` holds something that satisfies the camera contract. `Opaque`
/// holds anything else the application chose to put there; it is kept as-is
/// so the mistake stays visible, and never used for rendering.
#[derive(Clone)]
pub enum CameraRef {
    Camera(Rc<RefCell<dyn Camera>>),
    Opaque(Rc<dyn Any>),
}

impl CameraRef {
    pub fn new<T: Camera + 'static>(camera: Rc<RefCell<T>>) -> Self {
        CameraRef::Camera(camera)
    }

    pub fn opaque<T: Any>(value: Rc<T>) -> Self {
        CameraRef::Opaque(value)
    }

    pub fn as_camera(&self) -> Option<&Rc<RefCell<dyn Camera>>> {
        match self {
            CameraRef::Camera(camera) => Some(camera),
            CameraRef::Opaque(_) => None,
        }
    }

    /// Whether this reference points at the same allocation as `other`.
    ///
    /// Identity, not equality: two cameras with identical parameters are
    /// still different cameras.
    pub fn is<T: ?Sized>(&self, other: &Rc<T>) -> bool {
        self.addr() == Rc::as_ptr(other) as *const ()
    }

    fn addr(&self) -> *const () {
        match self {
            CameraRef::Camera(camera) => Rc::as_ptr(camera) as *const (),
            CameraRef::Opaque(value) => Rc::as_ptr(value) as *const (),
        }
    }
}

impl<T: Camera + 'static> From<Rc<RefCell<T>>> for CameraRef {
    fn from(camera: Rc<RefCell<T>>) -> Self {
        CameraRef::new(camera)
    }
}

impl fmt::Debug for CameraRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraRef::Camera(_) => write!(f, "CameraRef::Camera({:p})", self.addr()),
            CameraRef::Opaque(_) => write!(f, "CameraRef::Opaque({:p})", self.addr()),
        }
    }
}
