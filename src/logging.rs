//! Logging initialization for embedders and tests.
//!
//! Logs go to stderr so stdout stays free for whatever protocol the host
//! speaks. `RUST_LOG` takes precedence over programmatic configuration.

use tracing_subscriber::{fmt, EnvFilter};

/// Configuration for the tracing subscriber.
#[derive(Clone, Copy, Debug)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: &'static str,
    /// Whether to include the module path in each entry.
    pub with_target: bool,
    /// Whether to include timestamps.
    pub with_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info",
            with_target: true,
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default filter directive.
    pub fn with_level(mut self, level: &'static str) -> Self {
        self.level = level;
        self
    }

    /// Sets whether to include the module path.
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Sets whether to include timestamps.
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.with_timestamps = enabled;
        self
    }
}

/// Initializes the global tracing subscriber. Call once at process start.
pub fn init_logging(config: LoggingConfig) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(config.level)
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(config.with_target);

    if config.with_timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}

/// Initializes logging with default settings.
pub fn init_default_logging() {
    init_logging(LoggingConfig::default());
}
