use std::rc::Rc;

use crate::camera::Camera;
use crate::coords::Vec2;
use crate::error::Result;
use crate::events::{EventKind, Payload};
use crate::host::{HostEvent, HostListener};
use crate::input::normalize_pointer;
use crate::render::RenderSurface;

use super::Sketch;

impl<R: RenderSurface + 'static> Sketch<R> {
    /// Brings the surface (and the default camera, if active) in line with the
    /// host viewport, then emits `resize`.
    pub(super) fn resize_pass(&self) -> Result<()> {
        let viewport = self.inner.host.viewport();
        let size = viewport.size();

        {
            let mut surface = self.inner.surface.borrow_mut();
            surface.set_pixel_density(viewport.density_or_default());
            surface.set_size(size.width, size.height, self.inner.config.update_style);
        }

        // Application cameras manage their own aspect.
        if self.is_default_camera_active() {
            match (size.aspect(), self.inner.default_camera.try_borrow_mut()) {
                (Some(aspect), Ok(mut camera)) => {
                    camera.set_aspect(aspect);
                    camera.update_projection();
                }
                (None, _) => log::debug!("zero-height viewport; keeping default camera aspect"),
                (Some(_), Err(_)) => log::warn!("default camera busy during resize; aspect not updated"),
            }
        }

        log::debug!(
            "resized to {}x{} @{}x",
            size.width,
            size.height,
            viewport.density_or_default()
        );
        self.inner.bus.emit(&EventKind::Resize, &Payload::Size(size), self)
    }

    /// Normalizes a raw pointer position against the surface, stores it and
    /// emits `mousemove`.
    pub(super) fn pointer_moved(&self, raw: Vec2) -> Result<()> {
        let size = self.inner.surface.borrow().size();
        let mouse = normalize_pointer(raw, size)?;
        self.inner.mouse.set(mouse);

        self.inner.pointer_payload.emit_with(
            &self.inner.bus,
            &EventKind::MouseMove,
            self,
            |payload| *payload = Payload::Pointer(mouse),
        )
    }

    /// Listener registered with the host while running.
    pub(super) fn host_listener(&self) -> HostListener {
        let weak = Rc::downgrade(&self.inner);
        Rc::new(move |event: &HostEvent| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let sketch = Sketch { inner };
            if !sketch.is_running() {
                return;
            }

            let result = match event {
                HostEvent::Resized => sketch.resize_pass(),
                HostEvent::PointerMoved(raw) => sketch.pointer_moved(*raw),
            };
            if let Err(err) = result {
                log::warn!("{event:?} ignored: {err}");
            }
        })
    }
}
