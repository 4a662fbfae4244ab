//! The sketch: lifecycle controller for a render loop.
//!
//! A [`Sketch`] owns a clock, an event bus, a render surface, a scene root, a
//! default camera and the normalized pointer position. `start()` hooks it up to
//! its [`Host`] and [`FrameScheduler`]; from then on every scheduled frame
//! emits `update` and renders the scene until `stop()`.
//!
//! `Sketch` is a cheap handle (`Rc` inside). Event handlers receive it as their
//! second argument and may call any method on it, including `stop()`.
//! Closures stored by the sketch itself should not capture a `Sketch` clone:
//! the cycle keeps it alive and attached to its host forever. Use the handler
//! argument, or a [`WeakSketch`] from [`Sketch::downgrade`].

mod config;
mod lifecycle;
mod property;
mod resize;

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

pub use config::SketchConfig;
pub use property::Property;

use crate::camera::{CameraRef, PerspectiveCamera};
use crate::coords::Vec2;
use crate::error::{Result, SketchError};
use crate::events::{EventBus, EventKind, Flyweight, HandlerResult, Payload, Subscription};
use crate::host::{Host, ListenerId};
use crate::render::{self, RenderSurface};
use crate::schedule::{FrameScheduler, FrameToken};
use crate::time::{Clock, FrameTime, TimeSource};

/// Lifecycle state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SketchState {
    Idle,
    Running,
}

pub struct Sketch<R: RenderSurface + 'static> {
    inner: Rc<Inner<R>>,
}

/// Non-owning [`Sketch`] handle.
pub struct WeakSketch<R: RenderSurface + 'static> {
    inner: Weak<Inner<R>>,
}

impl<R: RenderSurface + 'static> WeakSketch<R> {
    /// The sketch, if any strong handle is still alive.
    pub fn upgrade(&self) -> Option<Sketch<R>> {
        self.inner.upgrade().map(|inner| Sketch { inner })
    }
}

impl<R: RenderSurface + 'static> Clone for WeakSketch<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

struct Inner<R: RenderSurface + 'static> {
    config: SketchConfig,
    bus: EventBus<Sketch<R>>,
    lifecycle: RefCell<Lifecycle>,
    clock: RefCell<Clock>,
    surface: RefCell<R>,
    scene: RefCell<R::Scene>,
    default_camera: Rc<RefCell<PerspectiveCamera>>,
    active_camera: RefCell<Option<CameraRef>>,
    mouse: Cell<Vec2>,
    host: Rc<dyn Host>,
    scheduler: Rc<dyn FrameScheduler>,
    update_payload: Flyweight,
    pointer_payload: Flyweight,
}

struct Lifecycle {
    state: SketchState,
    /// Bumped on every start; frame callbacks carry the epoch they were
    /// scheduled under and do nothing once it is stale.
    epoch: u64,
    pending: Option<FrameToken>,
    listener: Option<ListenerId>,
}

/// Builder for [`Sketch`].
pub struct SketchBuilder<R: RenderSurface + 'static> {
    surface: R,
    scene: R::Scene,
    host: Rc<dyn Host>,
    scheduler: Rc<dyn FrameScheduler>,
    config: SketchConfig,
    clock: Clock,
}

impl<R: RenderSurface + 'static> SketchBuilder<R> {
    pub fn config(mut self, config: SketchConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the wall-clock time source.
    pub fn time_source(mut self, source: impl TimeSource + 'static) -> Self {
        self.clock = Clock::with_source(source);
        self
    }

    pub fn build(self) -> Sketch<R> {
        let default_camera = Rc::new(RefCell::new(PerspectiveCamera::from_config(
            self.config.camera,
            1.0,
        )));
        let active = CameraRef::from(default_camera.clone());
        let clock = self.clock.with_max_delta(self.config.max_delta);

        Sketch {
            inner: Rc::new(Inner {
                config: self.config,
                bus: EventBus::new(),
                lifecycle: RefCell::new(Lifecycle {
                    state: SketchState::Idle,
                    epoch: 0,
                    pending: None,
                    listener: None,
                }),
                clock: RefCell::new(clock),
                surface: RefCell::new(self.surface),
                scene: RefCell::new(self.scene),
                default_camera,
                active_camera: RefCell::new(Some(active)),
                mouse: Cell::new(Vec2::zero()),
                host: self.host,
                scheduler: self.scheduler,
                update_payload: Flyweight::new(Payload::Frame(FrameTime::default())),
                pointer_payload: Flyweight::new(Payload::Pointer(Vec2::zero())),
            }),
        }
    }
}

impl<R: RenderSurface + 'static> Sketch<R> {
    /// Creates a sketch with default configuration and wall-clock time.
    pub fn new(
        surface: R,
        scene: R::Scene,
        host: Rc<dyn Host>,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> Self {
        Self::builder(surface, scene, host, scheduler).build()
    }

    pub fn builder(
        surface: R,
        scene: R::Scene,
        host: Rc<dyn Host>,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> SketchBuilder<R> {
        SketchBuilder {
            surface,
            scene,
            host,
            scheduler,
            config: SketchConfig::default(),
            clock: Clock::new(),
        }
    }

    pub fn config(&self) -> &SketchConfig {
        &self.inner.config
    }

    /// A handle that does not keep the sketch alive.
    pub fn downgrade(&self) -> WeakSketch<R> {
        WeakSketch {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn state(&self) -> SketchState {
        self.inner.lifecycle.borrow().state
    }

    pub fn is_running(&self) -> bool {
        self.state() == SketchState::Running
    }

    // ── read-only properties ─────────────────────────────────────────────

    /// Surface width in logical pixels.
    pub fn width(&self) -> u32 {
        self.inner.surface.borrow().size().width
    }

    /// Surface height in logical pixels.
    pub fn height(&self) -> u32 {
        self.inner.surface.borrow().size().height
    }

    /// Running time in seconds, as of the last frame.
    pub fn time(&self) -> f64 {
        self.inner.clock.borrow().elapsed()
    }

    /// Zeroes the running time.
    pub fn reset_time(&self) {
        self.inner.clock.borrow_mut().reset();
    }

    /// Reads a property by name (`width`, `height`, `time`, `mouse.x`, `mouse.y`).
    pub fn property(&self, name: &str) -> Result<f64> {
        Ok(match name.parse::<Property>()? {
            Property::Width => self.width() as f64,
            Property::Height => self.height() as f64,
            Property::Time => self.time(),
            Property::MouseX => self.mouse().x,
            Property::MouseY => self.mouse().y,
        })
    }

    /// Writes a property by name. Derived properties fail with
    /// [`SketchError::ReadonlyPropertyWrite`].
    pub fn set_property(&self, name: &str, value: f64) -> Result<()> {
        let property = name.parse::<Property>()?;
        if property.is_readonly() {
            return Err(SketchError::ReadonlyPropertyWrite {
                property: property.name(),
            });
        }

        let mut mouse = self.mouse();
        if property == Property::MouseX {
            mouse.x = value;
        } else {
            mouse.y = value;
        }
        self.set_mouse(mouse);
        Ok(())
    }

    // ── mutable state ────────────────────────────────────────────────────

    /// Normalized pointer position, both components in [-1, 1].
    pub fn mouse(&self) -> Vec2 {
        self.inner.mouse.get()
    }

    pub fn set_mouse(&self, mouse: Vec2) {
        self.inner.mouse.set(mouse);
    }

    pub fn scene(&self) -> Ref<'_, R::Scene> {
        self.inner.scene.borrow()
    }

    pub fn scene_mut(&self) -> RefMut<'_, R::Scene> {
        self.inner.scene.borrow_mut()
    }

    pub fn surface(&self) -> Ref<'_, R> {
        self.inner.surface.borrow()
    }

    pub fn surface_mut(&self) -> RefMut<'_, R> {
        self.inner.surface.borrow_mut()
    }

    /// The camera created and owned by the sketch.
    pub fn default_camera(&self) -> Rc<RefCell<PerspectiveCamera>> {
        Rc::clone(&self.inner.default_camera)
    }

    /// Current contents of the active-camera slot.
    pub fn camera(&self) -> Option<CameraRef> {
        self.inner.active_camera.borrow().clone()
    }

    /// Replaces the active-camera slot.
    ///
    /// Anything may go in the slot; frames rendered while it holds nothing
    /// usable fall back to the default camera and report `InvalidCamera`.
    pub fn set_camera(&self, camera: Option<CameraRef>) {
        *self.inner.active_camera.borrow_mut() = camera;
    }

    /// Puts the default camera back in the active slot.
    pub fn use_default_camera(&self) {
        self.set_camera(Some(CameraRef::from(self.default_camera())));
    }

    /// Whether the active slot holds the default camera instance.
    pub fn is_default_camera_active(&self) -> bool {
        self.inner
            .active_camera
            .borrow()
            .as_ref()
            .is_some_and(|camera| camera.is(&self.inner.default_camera))
    }

    // ── events ───────────────────────────────────────────────────────────

    /// Registers `handler` for `kind`. The handler gets the sketch as its
    /// second argument; capture a [`WeakSketch`] rather than a clone if it
    /// needs one elsewhere.
    pub fn on<F>(&self, kind: impl Into<EventKind>, handler: F) -> Subscription
    where
        F: Fn(&Payload, &Sketch<R>) -> HandlerResult + 'static,
    {
        self.inner.bus.on(kind, handler)
    }

    pub fn once<F>(&self, kind: impl Into<EventKind>, handler: F) -> Subscription
    where
        F: Fn(&Payload, &Sketch<R>) -> HandlerResult + 'static,
    {
        self.inner.bus.once(kind, handler)
    }

    pub fn off(&self, subscription: Subscription) -> bool {
        self.inner.bus.off(subscription)
    }

    /// Emits an event to this sketch's handlers.
    pub fn emit(&self, kind: impl Into<EventKind>, payload: &Payload) -> Result<()> {
        self.inner.bus.emit(&kind.into(), payload, self)
    }

    pub fn handler_count(&self, kind: impl Into<EventKind>) -> usize {
        self.inner.bus.handler_count(&kind.into())
    }

    // ── rendering ────────────────────────────────────────────────────────

    /// Renders one frame without advancing time or emitting `update`.
    pub fn render(&self) -> Result<()> {
        self.render_pass().map_err(SketchError::Surface)
    }

    /// Camera selection plus render call. Never fails because of the camera;
    /// an unusable slot is reported and the default camera renders instead.
    fn render_pass(&self) -> anyhow::Result<()> {
        let selection = {
            let active = self.inner.active_camera.borrow();
            render::select_camera(active.as_ref(), &self.inner.default_camera)
        };

        if selection.fallback {
            self.report_warning(SketchError::InvalidCamera);
        }

        let mut surface = self.inner.surface.borrow_mut();
        let scene = self.inner.scene.borrow();
        render::render_with(&mut *surface, &*scene, &selection.camera)
    }

    /// Logs a recoverable problem and emits it as a `warning` event.
    fn report_warning(&self, warning: SketchError) {
        log::warn!("{warning}");
        let payload = Payload::Warning(Rc::new(warning));
        if let Err(err) = self.inner.bus.emit(&EventKind::Warning, &payload, self) {
            log::error!("warning handler failed: {err}");
        }
    }
}

impl<R: RenderSurface + 'static> Clone for Sketch<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<R: RenderSurface + 'static> std::fmt::Debug for Sketch<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sketch")
            .field("state", &self.state())
            .field("time", &self.time())
            .field("mouse", &self.mouse())
            .field("camera", &self.camera())
            .finish_non_exhaustive()
    }
}

impl<R: RenderSurface + 'static> Drop for Inner<R> {
    fn drop(&mut self) {
        let lifecycle = self.lifecycle.get_mut();
        if let Some(listener) = lifecycle.listener.take() {
            self.host.remove_listener(listener);
        }
        if let Some(token) = lifecycle.pending.take() {
            self.scheduler.cancel(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use anyhow::anyhow;

    use super::*;
    use crate::camera::Camera;
    use crate::coords::{SurfaceSize, Viewport};
    use crate::host::ManualHost;
    use crate::schedule::ManualScheduler;
    use crate::time::ManualTime;

    // ── test doubles ─────────────────────────────────────────────────────────

    #[derive(Debug, Default)]
    struct RecordingSurface {
        size: SurfaceSize,
        density: f64,
        update_style: Option<bool>,
        /// Address and aspect of the camera used for each render.
        renders: Vec<(usize, f64)>,
        fail_renders: bool,
    }

    #[derive(Debug, Default)]
    struct Scene {
        rotation: f64,
    }

    impl RenderSurface for RecordingSurface {
        type Scene = Scene;

        fn set_size(&mut self, width: u32, height: u32, update_style: bool) {
            self.size = SurfaceSize::new(width, height);
            self.update_style = Some(update_style);
        }

        fn set_pixel_density(&mut self, density: f64) {
            self.density = density;
        }

        fn size(&self) -> SurfaceSize {
            self.size
        }

        fn render(&mut self, _scene: &Scene, camera: &dyn Camera) -> anyhow::Result<()> {
            if self.fail_renders {
                return Err(anyhow!("device lost"));
            }
            let addr = camera as *const dyn Camera as *const () as usize;
            self.renders.push((addr, camera.aspect()));
            Ok(())
        }
    }

    struct Harness {
        time: ManualTime,
        host: Rc<ManualHost>,
        scheduler: Rc<ManualScheduler>,
        sketch: Sketch<RecordingSurface>,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_viewport(Viewport::new(800, 600, 2.0))
        }

        fn with_viewport(viewport: Viewport) -> Self {
            let time = ManualTime::new();
            let host = Rc::new(ManualHost::new(viewport));
            let scheduler = Rc::new(ManualScheduler::new());
            let sketch = Sketch::builder(
                RecordingSurface::default(),
                Scene::default(),
                host.clone(),
                scheduler.clone(),
            )
            .time_source(time.clone())
            .build();

            let events = Rc::new(RefCell::new(Vec::new()));
            for kind in ["start", "stop", "update", "resize", "mousemove", "warning"] {
                let events = events.clone();
                sketch.on(kind, move |_, _| {
                    events.borrow_mut().push(kind.to_string());
                    Ok(())
                });
            }

            Self { time, host, scheduler, sketch, events }
        }

        /// Advances time by one 60Hz frame and steps the scheduler.
        fn frame(&self) -> usize {
            self.time.advance(0.0625);
            self.scheduler.step()
        }

        fn events(&self) -> Vec<String> {
            self.events.borrow().clone()
        }

        fn count(&self, kind: &str) -> usize {
            self.events.borrow().iter().filter(|e| *e == kind).count()
        }

        fn clear_events(&self) {
            self.events.borrow_mut().clear();
        }

        fn default_camera_addr(&self) -> usize {
            self.sketch.default_camera().as_ptr() as *const () as usize
        }
    }

    // ── lifecycle ────────────────────────────────────────────────────────────

    #[test]
    fn starts_idle() {
        let h = Harness::new();
        assert_eq!(h.sketch.state(), SketchState::Idle);
        assert_eq!(h.host.listener_count(), 0);
        assert_eq!(h.scheduler.pending(), 0);
    }

    #[test]
    fn start_emits_one_resize_and_one_start_before_first_update() {
        let h = Harness::new();
        h.sketch.start().unwrap();
        assert!(h.sketch.is_running());
        assert_eq!(h.events(), ["resize", "start"]);
        assert_eq!(h.scheduler.pending(), 1);

        h.frame();
        assert_eq!(h.events(), ["resize", "start", "update"]);
    }

    #[test]
    fn start_twice_fails_without_double_registration() {
        let h = Harness::new();
        h.sketch.start().unwrap();

        let err = h.sketch.start().unwrap_err();
        assert!(matches!(err, SketchError::AlreadyRunning));
        assert_eq!(h.host.registrations(), 1);
        assert_eq!(h.host.listener_count(), 1);
        assert_eq!(h.scheduler.pending(), 1);
        assert_eq!(h.count("start"), 1);
    }

    #[test]
    fn each_frame_updates_then_reschedules() {
        let h = Harness::new();
        h.sketch.start().unwrap();
        for _ in 0..5 {
            assert_eq!(h.frame(), 1);
        }
        assert_eq!(h.count("update"), 5);
        assert_eq!(h.sketch.surface().renders.len(), 5);
        assert_eq!(h.scheduler.pending(), 1);
    }

    #[test]
    fn update_payload_carries_delta_and_elapsed() {
        let h = Harness::new();
        let frames = Rc::new(RefCell::new(Vec::new()));
        {
            let frames = frames.clone();
            h.sketch.on("update", move |payload, _| {
                frames.borrow_mut().push(payload.frame().ok_or_else(|| anyhow!("no frame"))?);
                Ok(())
            });
        }

        h.sketch.start().unwrap();
        h.time.advance(0.25);
        h.scheduler.step();
        h.time.advance(0.5);
        h.scheduler.step();

        let frames = frames.borrow();
        assert_eq!(frames[0].delta, 0.25);
        assert_eq!(frames[0].elapsed, 0.25);
        assert_eq!(frames[1].delta, 0.5);
        assert_eq!(frames[1].elapsed, 0.75);
        assert_eq!(h.sketch.time(), 0.75);
    }

    #[test]
    fn update_precedes_render_within_a_frame() {
        let h = Harness::new();
        let renders_seen = Rc::new(Cell::new(usize::MAX));
        {
            let renders_seen = renders_seen.clone();
            h.sketch.on("update", move |_, sketch: &Sketch<RecordingSurface>| {
                renders_seen.set(sketch.surface().renders.len());
                Ok(())
            });
        }
        h.sketch.start().unwrap();
        h.frame();
        assert_eq!(renders_seen.get(), 0);
        assert_eq!(h.sketch.surface().renders.len(), 1);
    }

    #[test]
    fn stop_halts_the_loop() {
        let h = Harness::new();
        h.sketch.start().unwrap();
        h.frame();
        h.sketch.stop().unwrap();

        assert_eq!(h.sketch.state(), SketchState::Idle);
        assert_eq!(h.scheduler.pending(), 0);
        assert_eq!(h.host.listener_count(), 0);

        h.clear_events();
        for _ in 0..3 {
            h.frame();
        }
        assert_eq!(h.count("update"), 0);
    }

    #[test]
    fn stop_is_idempotent() {
        let h = Harness::new();
        h.sketch.stop().unwrap();
        assert_eq!(h.count("stop"), 0);

        h.sketch.start().unwrap();
        h.sketch.stop().unwrap();
        h.sketch.stop().unwrap();
        assert_eq!(h.count("stop"), 1);
    }

    #[test]
    fn stop_from_update_handler_suppresses_reschedule() {
        let h = Harness::new();
        h.sketch.on("update", |_, sketch: &Sketch<RecordingSurface>| {
            sketch.stop()?;
            Ok(())
        });
        h.sketch.start().unwrap();

        assert_eq!(h.frame(), 1);
        assert!(!h.sketch.is_running());
        assert_eq!(h.scheduler.pending(), 0);
        assert_eq!(h.count("update"), 1);
        assert_eq!(h.count("stop"), 1);
    }

    #[test]
    fn stale_frame_callback_is_ignored() {
        // A scheduler that cannot cancel: the old run's callback still fires.
        struct NoCancel(ManualScheduler);
        impl FrameScheduler for NoCancel {
            fn request(&self, callback: crate::schedule::FrameCallback) -> FrameToken {
                self.0.request(callback)
            }
            fn cancel(&self, _: FrameToken) {}
        }

        let time = ManualTime::new();
        let host = Rc::new(ManualHost::default());
        let scheduler = Rc::new(NoCancel(ManualScheduler::new()));
        let sketch = Sketch::builder(RecordingSurface::default(), Scene::default(), host, scheduler.clone())
            .time_source(time.clone())
            .build();
        let updates = Rc::new(Cell::new(0));
        {
            let updates = updates.clone();
            sketch.on("update", move |_, _| {
                updates.set(updates.get() + 1);
                Ok(())
            });
        }

        sketch.start().unwrap();
        sketch.stop().unwrap();
        sketch.start().unwrap();
        assert_eq!(scheduler.0.pending(), 2);

        scheduler.0.step();
        assert_eq!(updates.get(), 1, "only the current run's frame acts");
        assert_eq!(scheduler.0.pending(), 1);
    }

    #[test]
    fn restart_from_update_handler_keeps_a_single_loop() {
        let h = Harness::new();
        let restarted = Rc::new(Cell::new(false));
        {
            let restarted = restarted.clone();
            h.sketch.on("update", move |_, sketch: &Sketch<RecordingSurface>| {
                if !restarted.replace(true) {
                    sketch.stop()?;
                    sketch.start()?;
                }
                Ok(())
            });
        }
        h.sketch.start().unwrap();
        h.frame();

        assert!(h.sketch.is_running());
        assert_eq!(h.scheduler.pending(), 1);
        assert_eq!(h.host.listener_count(), 1);
    }

    #[test]
    fn elapsed_time_survives_restart_until_reset() {
        let h = Harness::new();
        h.sketch.start().unwrap();
        h.frame();
        h.sketch.stop().unwrap();
        let before = h.sketch.time();
        assert!(before > 0.0);

        h.time.advance(10.0);
        h.sketch.start().unwrap();
        h.frame();
        assert_eq!(h.sketch.time(), before + 0.0625);

        h.sketch.reset_time();
        assert_eq!(h.sketch.time(), 0.0);
    }

    #[test]
    fn handler_errors_in_start_are_returned_after_starting() {
        let h = Harness::new();
        h.sketch.on("start", |_, _| Err(anyhow!("bad setup")));
        let err = h.sketch.start().unwrap_err();
        assert!(matches!(err, SketchError::Handler(_)));
        assert!(h.sketch.is_running());
        assert_eq!(h.frame(), 1);
        assert_eq!(h.count("update"), 1);
    }

    #[test]
    fn failing_update_handler_does_not_kill_the_loop() {
        let h = Harness::new();
        h.sketch.on("update", |_, _| Err(anyhow!("boom")));
        h.sketch.start().unwrap();
        for _ in 0..3 {
            h.frame();
        }
        assert_eq!(h.count("update"), 3);
        assert_eq!(h.scheduler.pending(), 1);
    }

    #[test]
    fn failing_surface_does_not_kill_the_loop() {
        let h = Harness::new();
        h.sketch.surface_mut().fail_renders = true;
        h.sketch.start().unwrap();
        h.frame();
        h.frame();
        assert_eq!(h.count("update"), 2);
        assert!(matches!(h.sketch.render(), Err(SketchError::Surface(_))));
    }

    #[test]
    fn dropping_a_running_sketch_detaches_from_the_host() {
        let h = Harness::new();
        h.sketch.start().unwrap();
        let Harness { host, scheduler, sketch, .. } = h;
        drop(sketch);
        assert_eq!(host.listener_count(), 0);
        assert_eq!(scheduler.pending(), 0);
    }

    // ── resize ───────────────────────────────────────────────────────────────

    #[test]
    fn start_sizes_surface_and_default_camera() {
        let h = Harness::new();
        h.sketch.start().unwrap();

        let surface = h.sketch.surface();
        assert_eq!(surface.size, SurfaceSize::new(800, 600));
        assert_eq!(surface.density, 2.0);
        assert_eq!(surface.update_style, Some(true));
        drop(surface);

        assert_eq!((h.sketch.width(), h.sketch.height()), (800, 600));
        let camera = h.sketch.default_camera();
        assert_eq!(camera.borrow().aspect, 800.0 / 600.0);
        assert_eq!(camera.borrow().projection_updates(), 1);
    }

    #[test]
    fn host_resize_updates_default_camera() {
        let h = Harness::new();
        let sizes = Rc::new(RefCell::new(Vec::new()));
        {
            let sizes = sizes.clone();
            h.sketch.on("resize", move |payload, _| {
                sizes.borrow_mut().extend(payload.size());
                Ok(())
            });
        }
        h.sketch.start().unwrap();
        h.host.resize(1000, 500);

        assert_eq!(*sizes.borrow(), [SurfaceSize::new(800, 600), SurfaceSize::new(1000, 500)]);
        assert_eq!(h.sketch.default_camera().borrow().aspect, 2.0);
    }

    #[test]
    fn overridden_camera_is_left_alone_on_resize() {
        let h = Harness::new();
        let app = Rc::new(RefCell::new(PerspectiveCamera::new(60.0, 0.5, 0.1, 100.0)));
        h.sketch.set_camera(Some(CameraRef::from(app.clone())));
        assert!(!h.sketch.is_default_camera_active());

        h.sketch.start().unwrap();
        h.host.resize(1000, 500);

        assert_eq!(app.borrow().aspect, 0.5);
        assert_eq!(app.borrow().projection_updates(), 0);
        assert_eq!(h.sketch.default_camera().borrow().projection_updates(), 0);
        assert_eq!(h.count("resize"), 2, "resize is emitted on both camera paths");
    }

    #[test]
    fn default_camera_detection_is_by_identity() {
        let h = Harness::new();
        // Same parameters, different instance.
        let lookalike = Rc::new(RefCell::new(h.sketch.default_camera().borrow().clone()));
        h.sketch.set_camera(Some(CameraRef::from(lookalike.clone())));
        h.sketch.start().unwrap();
        assert_eq!(lookalike.borrow().aspect, 1.0);

        h.sketch.use_default_camera();
        assert!(h.sketch.is_default_camera_active());
        h.host.resize(300, 100);
        assert_eq!(h.sketch.default_camera().borrow().aspect, 3.0);
    }

    #[test]
    fn zero_height_viewport_keeps_camera_aspect() {
        let h = Harness::with_viewport(Viewport::new(800, 0, 1.0));
        h.sketch.start().unwrap();
        assert_eq!(h.sketch.default_camera().borrow().aspect, 1.0);
        assert_eq!(h.count("resize"), 1);
        assert_eq!(h.sketch.height(), 0);
    }

    #[test]
    fn host_events_after_stop_are_ignored() {
        let h = Harness::new();
        h.sketch.start().unwrap();
        h.sketch.stop().unwrap();
        h.clear_events();

        h.host.resize(10, 10);
        h.host.move_pointer(5.0, 5.0);
        assert!(h.events().is_empty());
        assert_eq!(h.sketch.mouse(), Vec2::zero());
    }

    // ── pointer ──────────────────────────────────────────────────────────────

    #[test]
    fn pointer_moves_are_normalized() {
        let h = Harness::new();
        h.sketch.start().unwrap();

        h.host.move_pointer(800.0, 0.0);
        assert_eq!(h.sketch.mouse(), Vec2::new(1.0, 1.0));
        h.host.move_pointer(0.0, 600.0);
        assert_eq!(h.sketch.mouse(), Vec2::new(-1.0, -1.0));
        h.host.move_pointer(400.0, 300.0);
        assert_eq!(h.sketch.mouse(), Vec2::zero());
        assert_eq!(h.count("mousemove"), 3);
    }

    #[test]
    fn mousemove_payload_matches_mouse() {
        let h = Harness::new();
        let seen = Rc::new(Cell::new(None));
        {
            let seen = seen.clone();
            h.sketch.on("mousemove", move |payload, sketch: &Sketch<RecordingSurface>| {
                seen.set(Some((payload.pointer(), sketch.mouse())));
                Ok(())
            });
        }
        h.sketch.start().unwrap();
        h.host.move_pointer(200.0, 150.0);

        let (payload, mouse) = seen.get().unwrap();
        assert_eq!(payload, Some(Vec2::new(-0.5, 0.5)));
        assert_eq!(mouse, Vec2::new(-0.5, 0.5));
    }

    #[test]
    fn pointer_over_empty_surface_is_dropped() {
        let h = Harness::with_viewport(Viewport::new(0, 0, 1.0));
        h.sketch.start().unwrap();
        h.host.move_pointer(10.0, 10.0);

        assert_eq!(h.count("mousemove"), 0);
        assert_eq!(h.sketch.mouse(), Vec2::zero());
        // The loop is unaffected.
        assert_eq!(h.frame(), 1);
    }

    // ── camera dispatch ──────────────────────────────────────────────────────

    #[test]
    fn default_camera_renders_by_default() {
        let h = Harness::new();
        h.sketch.start().unwrap();
        h.frame();
        assert_eq!(h.sketch.surface().renders[0].0, h.default_camera_addr());
        assert_eq!(h.count("warning"), 0);
    }

    #[test]
    fn application_camera_renders_when_assigned() {
        let h = Harness::new();
        let app = Rc::new(RefCell::new(PerspectiveCamera::new(30.0, 4.0, 1.0, 5.0)));
        h.sketch.set_camera(Some(CameraRef::from(app.clone())));
        h.sketch.start().unwrap();
        h.frame();

        let (addr, aspect) = h.sketch.surface().renders[0];
        assert_eq!(addr, app.as_ptr() as *const () as usize);
        assert_eq!(aspect, 4.0);
        assert_eq!(h.count("warning"), 0);
    }

    #[test]
    fn opaque_camera_falls_back_for_the_frame_with_one_warning() {
        let h = Harness::new();
        let warnings = Rc::new(RefCell::new(Vec::new()));
        {
            let warnings = warnings.clone();
            h.sketch.on("warning", move |payload, _| {
                warnings
                    .borrow_mut()
                    .push(matches!(payload.warning(), Some(SketchError::InvalidCamera)));
                Ok(())
            });
        }

        let not_a_camera = Rc::new(String::from("tripod"));
        h.sketch.set_camera(Some(CameraRef::opaque(not_a_camera.clone())));
        h.sketch.start().unwrap();
        h.frame();

        assert_eq!(*warnings.borrow(), [true]);
        assert_eq!(h.sketch.surface().renders.len(), 1);
        assert_eq!(h.sketch.surface().renders[0].0, h.default_camera_addr());

        // The slot is reported, not corrected.
        let slot = h.sketch.camera().unwrap();
        assert!(slot.is(&not_a_camera));
        assert!(slot.as_camera().is_none());
    }

    #[test]
    fn empty_camera_slot_falls_back_every_frame() {
        let h = Harness::new();
        h.sketch.set_camera(None);
        h.sketch.start().unwrap();
        h.frame();
        h.frame();
        assert_eq!(h.count("warning"), 2);
        assert_eq!(h.sketch.surface().renders.len(), 2);
        assert!(h.sketch.camera().is_none());
    }

    #[test]
    fn manual_render_does_not_emit_update() {
        let h = Harness::new();
        h.sketch.render().unwrap();
        assert_eq!(h.count("update"), 0);
        assert_eq!(h.sketch.surface().renders.len(), 1);
    }

    // ── properties and events ────────────────────────────────────────────────

    #[test]
    fn derived_properties_are_readonly() {
        let h = Harness::new();
        h.sketch.start().unwrap();
        h.frame();

        assert_eq!(h.sketch.property("width").unwrap(), 800.0);
        assert_eq!(h.sketch.property("time").unwrap(), 0.0625);
        for name in ["width", "height", "time"] {
            let err = h.sketch.set_property(name, 1.0).unwrap_err();
            assert!(matches!(err, SketchError::ReadonlyPropertyWrite { property } if property == name));
        }
        assert_eq!(h.sketch.width(), 800);
    }

    #[test]
    fn mouse_is_writable() {
        let h = Harness::new();
        h.sketch.set_property("mouse.x", 0.25).unwrap();
        h.sketch.set_property("mouse.y", -0.75).unwrap();
        assert_eq!(h.sketch.mouse(), Vec2::new(0.25, -0.75));
        assert!(matches!(
            h.sketch.set_property("zoom", 1.0),
            Err(SketchError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn handlers_can_mutate_the_scene() {
        let h = Harness::new();
        h.sketch.on("update", |payload, sketch: &Sketch<RecordingSurface>| {
            let frame = payload.frame().ok_or_else(|| anyhow!("no frame"))?;
            sketch.scene_mut().rotation = frame.elapsed * 0.1;
            Ok(())
        });
        h.sketch.start().unwrap();
        h.frame();
        h.frame();
        assert_eq!(h.sketch.scene().rotation, 0.125 * 0.1);
    }

    #[test]
    fn named_events_reach_their_handlers() {
        let h = Harness::new();
        let got = Rc::new(Cell::new(0_u32));
        {
            let got = got.clone();
            h.sketch.on("beat", move |payload, _| {
                got.set(*payload.downcast_ref::<u32>().ok_or_else(|| anyhow!("bad payload"))?);
                Ok(())
            });
        }
        h.sketch.emit("beat", &Payload::custom(120_u32)).unwrap();
        assert_eq!(got.get(), 120);
        assert_eq!(h.sketch.handler_count("beat"), 1);
    }

    #[test]
    fn off_detaches_sketch_handlers() {
        let h = Harness::new();
        let sub = h.sketch.on("update", |_, _| Err(anyhow!("should not run")));
        assert!(h.sketch.off(sub));
        h.sketch.start().unwrap();
        h.frame();
        assert_eq!(h.count("update"), 1);
    }

    #[test]
    fn reset_time_from_update_keeps_the_next_delta_whole() {
        let h = Harness::new();
        let deltas = Rc::new(RefCell::new(Vec::new()));
        {
            let deltas = deltas.clone();
            h.sketch.on("update", move |payload, _| {
                deltas.borrow_mut().extend(payload.frame().map(|f| f.delta));
                Ok(())
            });
        }
        h.sketch.start().unwrap();
        h.time.advance(0.010);
        h.sketch.reset_time();
        h.time.advance(0.006);
        h.scheduler.step();

        let deltas = deltas.borrow();
        assert_eq!(deltas.len(), 1);
        assert!((deltas[0] - 0.016).abs() < 1e-12, "delta = {}", deltas[0]);
        assert_eq!(h.sketch.time(), deltas[0]);
    }

    #[test]
    fn busy_default_camera_fails_the_render_without_a_warning() {
        let h = Harness::new();
        let camera = h.sketch.default_camera();
        let guard = camera.borrow_mut();

        let err = h.sketch.render().unwrap_err();
        assert!(matches!(err, SketchError::Surface(_)));
        assert_eq!(h.count("warning"), 0);
        assert!(h.sketch.surface().renders.is_empty());

        drop(guard);
        h.sketch.render().unwrap();
        assert_eq!(h.sketch.surface().renders.len(), 1);
    }

    #[test]
    fn handlers_holding_a_weak_handle_let_the_sketch_drop() {
        let h = Harness::new();
        let weak = h.sketch.downgrade();
        h.sketch.on("resize", move |_, _| {
            if let Some(sketch) = weak.upgrade() {
                sketch.set_mouse(Vec2::zero());
            }
            Ok(())
        });
        h.sketch.start().unwrap();

        let handle = h.sketch.downgrade();
        let Harness { host, scheduler, sketch, .. } = h;
        drop(sketch);
        assert!(handle.upgrade().is_none());
        assert_eq!(host.listener_count(), 0);
        assert_eq!(scheduler.pending(), 0);
    }
}
