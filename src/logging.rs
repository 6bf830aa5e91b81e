// src/logging.rs
//! Subscriber setup for the binary. The library only emits events.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_FILTER: &str = "lazytok_core=info";

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub json_format: bool,
    /// Overrides `RUST_LOG` and the default filter.
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            filter: None,
        }
    }
}

/// Installs the global subscriber, writing to stderr so stdout stays clean
/// for command output. A second call is a no-op.
pub fn init(config: &LogConfig) {
    let env_filter = match &config.filter {
        Some(f) => EnvFilter::new(f),
        None => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
    };

    let result = if config.json_format {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!(json_format = config.json_format, "logging initialized");
    }
}
