use super::{FrameCallback, FrameToken};

/// Pending frame callbacks in request order.
///
/// Building block for scheduler implementations.
#[derive(Default)]
pub struct CallbackQueue {
    next: u64,
    pending: Vec<(FrameToken, FrameCallback)>,
}

impl CallbackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, callback: FrameCallback) -> FrameToken {
        let token = FrameToken::new(self.next);
        self.next = self.next.wrapping_add(1);
        self.pending.push((token, callback));
        token
    }

    /// Removes `token`. Returns whether it was pending.
    pub fn cancel(&mut self, token: FrameToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(t, _)| *t != token);
        self.pending.len() != before
    }

    /// Takes every pending callback, leaving the queue empty.
    ///
    /// Callers run the returned batch after releasing any borrow of the queue,
    /// so callbacks can request the next frame.
    pub fn take(&mut self) -> Vec<(FrameToken, FrameCallback)> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl std::fmt::Debug for CallbackQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackQueue")
            .field("next", &self.next)
            .field("pending", &self.pending.len())
            .finish()
    }
}
