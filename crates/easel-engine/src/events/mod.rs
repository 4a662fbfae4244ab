//! Synchronous publish/subscribe for sketch events.
//!
//! Two emission styles are offered:
//! - allocated: the caller builds a `Payload` for one `emit` call
//! - reusable: a `Flyweight` owns one payload slot that is rewritten in place
//!   before every dispatch, so per-frame events do not allocate
//!
//! Handlers only ever see `&Payload`. A handler that needs the data after it
//! returns must clone it; for flyweight events the slot is overwritten on the
//! next frame.

mod bus;
mod kind;
mod payload;

pub use bus::{EventBus, HandlerResult, Subscription};
pub use kind::EventKind;
pub use payload::{Flyweight, Payload};
