use thiserror::Error;

/// Errors produced by the sketch lifecycle and its collaborators.
///
/// Only `AlreadyRunning`, `ReadonlyPropertyWrite` and `UnknownProperty` are
/// returned for API misuse. `InvalidCamera` is reported as a warning from the
/// frame loop and never stops it.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("the sketch is already running")]
    AlreadyRunning,

    #[error("cannot normalize against a {width}x{height} surface")]
    InvalidSurfaceSize { width: u32, height: u32 },

    #[error(
        "the active camera slot does not hold a recognizable camera; \
         falling back to the default camera"
    )]
    InvalidCamera,

    #[error("the \"{property}\" property is readonly")]
    ReadonlyPropertyWrite { property: &'static str },

    #[error("unknown sketch property \"{name}\"")]
    UnknownProperty { name: String },

    #[error("event handler failed: {0:#}")]
    Handler(#[source] anyhow::Error),

    #[error("render surface failed: {0:#}")]
    Surface(#[source] anyhow::Error),
}

pub type Result<T, E = SketchError> = std::result::Result<T, E>;
