use std::rc::Rc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::host::HostEvent;
use crate::logging::{init_logging, LoggingConfig};

use super::host::WinitHost;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Logger to install before the event loop starts. `None` leaves logging
    /// to the caller.
    pub logging: Option<LoggingConfig>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "easel".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            logging: Some(LoggingConfig::default()),
        }
    }
}

/// Entry point for the desktop runtime.
pub struct Runtime;

impl Runtime {
    /// Opens a window and runs the event loop until it is closed.
    ///
    /// `setup` is called once the window exists, with the host wrapping it.
    /// It typically builds a `Sketch` on that host, starts it and returns it;
    /// the returned value is kept alive for the life of the window.
    pub fn run<F, T>(config: RuntimeConfig, setup: F) -> Result<()>
    where
        F: FnOnce(Rc<WinitHost>) -> Result<T>,
        T: 'static,
    {
        if let Some(logging) = config.logging.clone() {
            init_logging(logging);
        }

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, setup);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct AppState<F, T> {
    config: RuntimeConfig,
    setup: Option<F>,
    host: Option<Rc<WinitHost>>,
    app: Option<T>,
    error: Option<anyhow::Error>,
}

impl<F, T> AppState<F, T>
where
    F: FnOnce(Rc<WinitHost>) -> Result<T>,
{
    fn new(config: RuntimeConfig, setup: F) -> Self {
        Self {
            config,
            setup: Some(setup),
            host: None,
            app: None,
            error: None,
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        let host = Rc::new(WinitHost::new(window));
        self.host = Some(Rc::clone(&host));

        if let Some(setup) = self.setup.take() {
            self.app = Some(setup(host).context("sketch setup failed")?);
        }
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        // The app holds handles into the host; drop it first so it can detach.
        self.app = None;
        self.host = None;
        event_loop.exit();
    }
}

impl<F, T> ApplicationHandler for AppState<F, T>
where
    F: FnOnce(Rc<WinitHost>) -> Result<T>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return;
        }

        if let Err(err) = self.open(event_loop) {
            log::error!("{err:#}");
            self.error = Some(err);
            self.shutdown(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Frames are requested by the scheduler; nothing to do until then.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(host) = self.host.clone() else {
            return;
        };
        if host.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                host.dispatch(&HostEvent::Resized);
            }

            WindowEvent::CursorMoved { position, .. } => {
                host.dispatch(&HostEvent::PointerMoved(host.to_logical(position)));
            }

            WindowEvent::RedrawRequested => {
                host.run_frame();
            }

            _ => {}
        }
    }
}
