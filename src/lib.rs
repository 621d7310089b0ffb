//! Backend service toolkit.
//!
//! Sortable ID generation, combinatorial query-parameter routing, request
//! context propagation, context-aware logging, HTTP middleware, and a few
//! date, string and slice helpers.

pub mod config;
pub mod context;
pub mod dates;
pub mod hid;
pub mod http;
pub mod observability;
pub mod routing;
pub mod util;

pub use config::schema::KitConfig;
pub use context::RequestContext;
pub use hid::IdGenerator;
pub use http::HttpServer;
pub use routing::{QueryRouter, RouteBuilder};
