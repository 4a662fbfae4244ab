//! Frame scheduling.
//!
//! The sketch never touches a host timing primitive directly. It is handed a
//! [`FrameScheduler`] and asks it for "a callback before the next frame":
//! - `ManualScheduler` steps frames explicitly (tests, offline rendering)
//! - `IntervalScheduler` fires at a fixed interval from a polling loop
//! - `window::WinitHost` ties requests to window redraws

mod interval;
mod manual;
mod queue;

pub use interval::IntervalScheduler;
pub use manual::ManualScheduler;
pub use queue::CallbackQueue;

/// Callback run by a scheduler when its frame comes up.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Identifies one pending frame request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// "Run this before the next frame" / "never mind".
///
/// Methods take `&self`: schedulers are shared between the sketch that
/// requests frames and the host code that drives them.
pub trait FrameScheduler {
    /// Queues `callback` for the next frame.
    fn request(&self, callback: FrameCallback) -> FrameToken;

    /// Drops a pending request. Unknown or already-run tokens are ignored.
    fn cancel(&self, token: FrameToken);
}
