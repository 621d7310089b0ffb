//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware stack)
//!     → middleware/ (transaction ID, request logging, panic recovery)
//!     → routing::QueryRouter (path + query matchers)
//!     → handler, reading values through query.rs
//! ```

pub mod middleware;
pub mod query;
pub mod server;

pub use query::{get_optional_param, get_param, get_param_or, FromParam, ParamError, ParamSource};
pub use server::{with_middleware, AppState, HttpServer, ServerError};
