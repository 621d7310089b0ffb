//! Context-aware logging.
//!
//! Every event carries the active [`RequestContext`] fields: `tx_id`,
//! `identifier` and `log_info`. Errors add an `error` field, and when
//! traces are enabled error and warning events add a `trace` backtrace.

use std::backtrace::Backtrace;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{event, Level};

use crate::context::RequestContext;
use crate::observability::logging::LoggingError;

static SHOW_TRACES: AtomicBool = AtomicBool::new(false);

/// Enable or disable backtraces on error and warning events.
pub fn set_show_traces(show: bool) {
    SHOW_TRACES.store(show, Ordering::Relaxed);
}

pub fn show_traces() -> bool {
    SHOW_TRACES.load(Ordering::Relaxed)
}

/// Severity used by [`NamedLogger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
    Trace,
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggingError::InvalidLevel(s.to_string())),
        }
    }
}

macro_rules! emit_at {
    ($level:expr, $ctx:expr, $error:expr, $trace:expr, $message:expr) => {
        event!(
            $level,
            tx_id = $ctx.tx_id(),
            identifier = $ctx.identifier(),
            log_info = $ctx.log_info().map(tracing::field::display),
            error = $error,
            trace = $trace,
            "{}",
            $message
        )
    };
}

fn emit(level: LogLevel, ctx: &RequestContext, error: Option<String>, message: &dyn Display) {
    let wants_trace = matches!(level, LogLevel::Error | LogLevel::Warning) && show_traces();
    let trace = wants_trace.then(|| Backtrace::force_capture().to_string());
    let error = error.as_deref();
    let trace = trace.as_deref();

    match level {
        LogLevel::Error => emit_at!(Level::ERROR, ctx, error, trace, message),
        LogLevel::Warning => emit_at!(Level::WARN, ctx, error, trace, message),
        LogLevel::Info => emit_at!(Level::INFO, ctx, error, trace, message),
        LogLevel::Debug => emit_at!(Level::DEBUG, ctx, error, trace, message),
        LogLevel::Trace => emit_at!(Level::TRACE, ctx, error, trace, message),
    }
}

/// Log an error with the active context.
pub fn error(err: &dyn std::error::Error, message: impl Display) {
    emit(LogLevel::Error, &RequestContext::current(), Some(err.to_string()), &message);
}

/// Log a warning with the active context.
pub fn warn(message: impl Display) {
    emit(LogLevel::Warning, &RequestContext::current(), None, &message);
}

/// Log at info level with the active context.
pub fn info(message: impl Display) {
    emit(LogLevel::Info, &RequestContext::current(), None, &message);
}

/// Log at debug level with the active context.
pub fn debug(message: impl Display) {
    emit(LogLevel::Debug, &RequestContext::current(), None, &message);
}

/// Log at trace level with the active context.
pub fn trace(message: impl Display) {
    emit(LogLevel::Trace, &RequestContext::current(), None, &message);
}

/// Receives one preformatted line per call.
pub trait LogSink {
    fn log_line(&self, line: &str);
}

/// A [`LogSink`] that logs every line at a fixed level under an identifier.
#[derive(Debug, Clone)]
pub struct NamedLogger {
    identifier: String,
    level: LogLevel,
}

impl NamedLogger {
    pub fn new(identifier: impl Into<String>, level: LogLevel) -> Self {
        Self {
            identifier: identifier.into(),
            level,
        }
    }
}

impl LogSink for NamedLogger {
    fn log_line(&self, line: &str) {
        let mut ctx = RequestContext::new();
        if !self.identifier.is_empty() {
            ctx = ctx.with_identifier(self.identifier.as_str());
        }

        // at error level the line is the error itself, with no message
        if self.level == LogLevel::Error {
            emit(self.level, &ctx, Some(line.to_string()), &"");
        } else {
            emit(self.level, &ctx, None, &line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        out.contents()
    }

    #[derive(Debug)]
    struct Boom;

    impl Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "boom")
        }
    }

    impl std::error::Error for Boom {}

    #[test]
    fn test_context_fields_are_logged() {
        let ctx = RequestContext::new()
            .with_tx_id("tx-1")
            .with_log_info(json!({"user": 7}));

        let out = capture(|| ctx.in_scope(|| info("hello world")));

        assert!(out.contains(r#""tx_id":"tx-1""#), "{out}");
        assert!(out.contains(r#""message":"hello world""#), "{out}");
        assert!(out.contains(r#""level":"INFO""#), "{out}");
        assert!(out.contains("log_info"), "{out}");
    }

    #[test]
    fn test_composed_message() {
        let out = capture(|| info(format_args!("{} {} {}", "listing", "page", 3)));
        assert!(out.contains(r#""message":"listing page 3""#), "{out}");
    }

    #[test]
    fn test_error_field() {
        let out = capture(|| error(&Boom, "request failed"));
        assert!(out.contains(r#""error":"boom""#), "{out}");
        assert!(out.contains(r#""level":"ERROR""#), "{out}");
        assert!(!out.contains("tx_id"), "{out}");
    }

    #[test]
    fn test_named_logger() {
        let logger = NamedLogger::new("router", LogLevel::Debug);
        let out = capture(|| logger.log_line("Created endpoint /a"));
        assert!(out.contains(r#""identifier":"router""#), "{out}");
        assert!(out.contains(r#""level":"DEBUG""#), "{out}");
        assert!(out.contains("Created endpoint /a"), "{out}");
    }

    #[test]
    fn test_named_logger_at_error_level() {
        let logger = NamedLogger::new("router", LogLevel::Error);
        let out = capture(|| logger.log_line("route failed"));
        assert!(out.contains(r#""error":"route failed""#), "{out}");
        assert!(out.contains(r#""message":"""#), "{out}");
        assert_eq!(out.matches("route failed").count(), 1, "{out}");
    }

    #[test]
    fn test_trace_field_only_on_error_and_warn() {
        set_show_traces(true);
        let warned = capture(|| warn("careful"));
        let failed = capture(|| error(&Boom, "failed"));
        let informed = capture(|| {
            info("fyi");
            debug("detail");
            trace("noise");
        });
        set_show_traces(false);

        assert!(warned.contains(r#""trace":"#), "{warned}");
        assert!(failed.contains(r#""trace":"#), "{failed}");
        assert!(!informed.contains(r#""trace":"#), "{informed}");

        let quiet = capture(|| warn("careful"));
        assert!(!quiet.contains(r#""trace":"#), "{quiet}");
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert!("fatal".parse::<LogLevel>().is_err());
    }
}
