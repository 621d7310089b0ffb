//! Logging subsystem initialization.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: overrides the configured level filter when set

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

use crate::config::{LogFormat, LoggingConfig};
use crate::observability::logger::set_show_traces;

/// Errors raised while configuring logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid formatter: {0}")]
    InvalidFormat(String),

    #[error("could not parse log level {0}")]
    InvalidLevel(String),

    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),

    #[error("could not reload log level: {0}")]
    Reload(String),
}

impl LogFormat {
    /// Parse a format name; accepts `json` and `text` in any case.
    pub fn parse(s: &str) -> Result<Self, LoggingError> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            _ => Err(LoggingError::InvalidFormat(s.to_string())),
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Handle for adjusting logging after initialization.
#[derive(Clone)]
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// Replace the active level filter.
    pub fn set_level(&self, level: &str) -> Result<(), LoggingError> {
        let filter = parse_filter(level)?;
        self.filter
            .reload(filter)
            .map_err(|e| LoggingError::Reload(e.to_string()))
    }

    /// Toggle backtraces on error and warning events.
    pub fn set_show_traces(&self, show: bool) {
        set_show_traces(show);
    }
}

fn parse_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|_| LoggingError::InvalidLevel(level.to_string()))
}

/// Install the global tracing subscriber.
///
/// Call once at startup. A second call returns
/// [`LoggingError::AlreadyInitialized`].
pub fn init_logging(config: &LoggingConfig) -> Result<LogHandle, LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(&config.level)?,
    };
    let (filter, handle) = reload::Layer::new(filter);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .try_init(),
    };
    installed.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    set_show_traces(config.show_traces);

    Ok(LogHandle { filter: handle })
}
