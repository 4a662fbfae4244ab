//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `Clock` per sketch
//! - `start()` when the loop starts, `tick()` once per frame, `stop()` when it halts
//! - inject `ManualTime` in tests so frames can be stepped without real time passing

mod clock;
mod source;

pub use clock::{Clock, FrameTime};
pub use source::{ManualTime, MonotonicTime, TimeSource};
