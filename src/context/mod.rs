//! Request context propagation.
//!
//! # Data Flow
//! ```text
//! transaction middleware
//!     → RequestContext { tx_id, .. }
//!     → scope(): task-local for the rest of the request future
//!     → observability::logger reads it for every event
//!
//! background work
//!     → copy(): fresh context with tx_id + selected keys
//!     → spawn_detached(): new task running under the copy
//! ```
//!
//! # Design Decisions
//! - Context rides in a tokio task-local, not in function arguments
//! - Detached tasks get a copy, never a reference to the request's context

mod request_context;

pub use request_context::{copy, spawn_detached, RequestContext};
