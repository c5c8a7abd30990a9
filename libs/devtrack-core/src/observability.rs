//! Structured logging setup
//!
//! Libraries only emit `tracing` events; binaries call [`init_logging`] once.
//! `RUST_LOG` overrides the configured level when set.

use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use tracing::{info, Level};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
    /// Log span close events with their durations
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
            span_events: false,
        }
    }
}

impl LoggingConfig {
    /// Parsed level
    ///
    /// # Errors
    /// Returns `TrackerError::Configuration` for an unknown level name
    pub fn parsed_level(&self) -> Result<Level> {
        self.level.parse::<Level>().map_err(|e| {
            TrackerError::configuration(format!("Invalid log level '{}': {e}", self.level))
        })
    }
}

/// Install the global subscriber; logs go to stderr
///
/// # Errors
/// Returns `TrackerError::Configuration` for an invalid level or if a global
/// subscriber is already installed
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    config.parsed_level()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let span_events = if config.span_events {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        let json_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_span_events(span_events);
        registry.with(json_layer).try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_span_events(span_events);
        registry.with(fmt_layer).try_init()
    };
    result.map_err(|e| TrackerError::configuration(format!("Failed to initialize logging: {e}")))?;

    info!(level = %config.level, json = config.json, "logging initialized");
    Ok(())
}
