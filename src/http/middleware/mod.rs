//! HTTP middleware.
//!
//! # Data Flow
//! ```text
//! Request
//!     → transaction.rs (header txID or new UUID, RequestContext scope)
//!     → request_log.rs (buffer + log request, log response on the way out)
//!     → recover.rs (panic → 500)
//!     → handler
//! ```
//!
//! # Design Decisions
//! - The transaction layer is outermost so every log line carries tx_id
//! - Panic recovery sits innermost so the logging layer sees the 500

pub mod recover;
pub mod request_log;
pub mod transaction;

pub use recover::{recover_panic_layer, RecoveredPanic};
pub use request_log::{log_request_response, RequestLogSettings};
pub use transaction::{transaction_id_middleware, TransactionId, TransactionSettings};
