use std::sync::Once;

/// How the runtime installs `env_logger`.
///
/// Filter precedence: `env_filter` when set (`env_logger` syntax, e.g.
/// "info,easel_engine=debug"), then `RUST_LOG`, then `info`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    /// Config with an explicit filter, ignoring `RUST_LOG`.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the `log` backend, at most once per process.
///
/// A sketch is often embedded in an application that already set up its own
/// logger. In that case installation is skipped and the existing logger keeps
/// receiving the engine's records; this never panics.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }
        builder.write_style(config.write_style);

        match builder.try_init() {
            Ok(()) => log::debug!("env_logger installed"),
            Err(_) => log::debug!("a logger is already installed; keeping it"),
        }
    });
}
