//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured level. `-v` on the command
//! line raises the configured level to `debug`. Logs are written to stderr.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LoggingConfig;

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Default filter directive for a level
#[must_use]
pub fn default_directive(level: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { level };
    format!("flight_weather={level},tower_http={level}")
}

/// Install the global subscriber; a second call is a no-op
pub fn init(config: &LoggingConfig, verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level, verbose)));

    let registry = tracing_subscriber::registry().with(env_filter);

    // Ignore error if a subscriber is already set
    let _ = match LogFormat::parse(&config.format) {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init(),
    };
}
