//! Logger setup.
//!
//! The crate itself only uses the `log` facade; this installs `env_logger`
//! behind it for binaries that do not bring their own logger.

mod init;

pub use init::{init_logging, LoggingConfig};
