//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct KitConfig {
    /// Demo service listener settings.
    pub server: ServerConfig,

    /// Logging output settings.
    pub logging: LoggingConfig,

    /// Transaction ID middleware settings.
    pub transaction: TransactionConfig,

    /// Request/response logging middleware settings.
    pub request_log: RequestLogConfig,

    /// Defaults for generated identifiers.
    pub hid: HidConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON structured logging (production).
    #[default]
    Json,
    /// Human-readable text logging (development).
    Text,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,

    /// Level filter (trace, debug, info, warn, error or an `EnvFilter` directive).
    pub level: String,

    /// Attach a backtrace to error and warning events.
    pub show_traces: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "debug".to_string(),
            show_traces: false,
        }
    }
}

/// Transaction ID middleware configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TransactionConfig {
    /// Header carrying the transaction ID.
    pub header: String,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            header: "txID".to_string(),
        }
    }
}

/// Request/response logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RequestLogConfig {
    /// Enable the logging middleware.
    pub enabled: bool,

    /// Requests whose URI contains any of these substrings are not logged.
    pub excluded_uris: Vec<String>,
}

impl Default for RequestLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            excluded_uris: vec!["/login".to_string()],
        }
    }
}

/// Identifier generation defaults.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct HidConfig {
    /// Use base 62 instead of base 36.
    pub include_uppercase: bool,

    /// Insert a separator every `group_size` characters; `<= 0` disables grouping.
    pub group_size: i32,

    /// Separator character (default `-`).
    pub separator: Option<char>,
}
