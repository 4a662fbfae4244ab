use std::rc::Rc;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use easel_engine::camera::Camera;
use easel_engine::coords::SurfaceSize;
use easel_engine::logging::LoggingConfig;
use easel_engine::render::RenderSurface;
use easel_engine::window::{Runtime, RuntimeConfig, WinitHost};
use easel_engine::{Sketch, SketchConfig};

/// Scene: a single spinning cube, tilted by the pointer.
#[derive(Debug, Default)]
struct Cube {
    spin: f64,
    tilt: (f64, f64),
}

/// Surface that reports what it would draw instead of drawing it.
#[derive(Debug, Default)]
struct ConsoleSurface {
    size: SurfaceSize,
    density: f64,
    frames: u64,
}

impl RenderSurface for ConsoleSurface {
    type Scene = Cube;

    fn set_size(&mut self, width: u32, height: u32, _update_style: bool) {
        self.size = SurfaceSize::new(width, height);
    }

    fn set_pixel_density(&mut self, density: f64) {
        self.density = density;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn render(&mut self, cube: &Cube, camera: &dyn Camera) -> anyhow::Result<()> {
        self.frames += 1;
        if self.frames % 120 == 0 {
            log::info!(
                "frame {}: {}x{}@{:.1} aspect={:.3} spin={:.2} tilt=({:.2}, {:.2})",
                self.frames,
                self.size.width,
                self.size.height,
                self.density,
                camera.aspect(),
                cube.spin,
                cube.tilt.0,
                cube.tilt.1,
            );
        }
        Ok(())
    }
}

fn setup(host: Rc<WinitHost>) -> Result<Sketch<ConsoleSurface>> {
    let sketch = Sketch::builder(ConsoleSurface::default(), Cube::default(), host.clone(), host)
        .config(SketchConfig {
            max_delta: Some(0.25),
            ..SketchConfig::default()
        })
        .build();

    sketch.on("start", |_, _| {
        log::info!("sketch started");
        Ok(())
    });

    sketch.on("update", |payload, sketch: &Sketch<ConsoleSurface>| {
        let frame = payload.frame().context("update without frame timing")?;
        sketch.scene_mut().spin += frame.delta * std::f64::consts::FRAC_PI_2;
        Ok(())
    });

    sketch.on("mousemove", |payload, sketch: &Sketch<ConsoleSurface>| {
        if let Some(pointer) = payload.pointer() {
            sketch.scene_mut().tilt = (pointer.y * 0.5, pointer.x * 0.5);
        }
        Ok(())
    });

    sketch.on("resize", |payload, _| {
        if let Some(size) = payload.size() {
            log::info!("resized to {}x{}", size.width, size.height);
        }
        Ok(())
    });

    sketch.start()?;
    Ok(sketch)
}

fn main() -> Result<()> {
    let config = RuntimeConfig {
        title: "Easel Studio".to_string(),
        initial_size: LogicalSize::new(820.0, 560.0),
        logging: Some(LoggingConfig::with_filter("info,easel_engine=debug")),
    };

    Runtime::run(config, setup)
}
