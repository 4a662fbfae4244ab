//! Input subsystem.
//!
//! The sketch tracks a single pointer position. Hosts report raw positions in
//! surface pixels; `normalize_pointer` converts them into the device-independent
//! [-1, 1] space exposed to applications.

mod pointer;

pub use pointer::normalize_pointer;
