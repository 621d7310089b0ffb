//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Application code / middleware
//!     → logger.rs (events enriched with the active RequestContext)
//!     → logging.rs (tracing-subscriber: JSON or text, reloadable level)
//!     → stderr/stdout
//!
//! HTTP middleware
//!     → metrics.rs (request counters and latency histograms)
//!     → whichever `metrics` recorder the service installs
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Transaction ID flows from the middleware into every event
//! - Metrics are no-ops until the host service installs a recorder

pub mod logger;
pub mod logging;
pub mod metrics;

pub use logger::{LogLevel, LogSink, NamedLogger};
pub use logging::{init_logging, LogHandle, LoggingError};
