//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route declaration (at startup):
//!     RouteBuilder / RouteSpec (path, methods, query matchers)
//!     → registrar.rs finalize(): one RouteRegistration per optional subset
//!     → Registrar::register() for each, most specific first
//!     → optional LogSink line per registration
//!
//! Incoming request (QueryRouter):
//!     path → variants in registration order
//!     → matcher.rs (method + every query condition)
//!     → first match wins, its values exposed as QueryVars
//! ```
//!
//! # Design Decisions
//! - Combination logic is a pure function, testable without a router
//! - Optional matchers keep insertion order; subsets are emitted largest
//!   first and lexicographically by position within a size
//! - Patterns compile when registered, never in the request path

pub mod matcher;
pub mod registrar;
pub mod router;

pub use matcher::{QueryCondition, QueryMatcher, QueryVars};
pub use registrar::{create, finalize, Registrar, RouteBuilder, RouteRegistration, RouteSpec};
pub use router::{QueryRouter, RouteError};
