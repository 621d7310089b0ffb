//! Human-readable sortable identifiers.
//!
//! # Data Flow
//! ```text
//! Clock (nanoseconds since Unix epoch)
//!     → generator.rs (lock, enforce strictly increasing value)
//!     → encoding.rs (base 36 / base 62 text)
//!     → encoding.rs (optional grouping with a separator)
//!     → String
//! ```
//!
//! # Design Decisions
//! - One `IdGenerator` per process, shared by reference; no hidden global
//! - Generation is serialized by a mutex so issued values never repeat
//! - A frozen or backwards clock falls back to `last + 1`
//! - Base 62 uses the `0-9a-zA-Z` digit order

pub mod encoding;
pub mod generator;

pub use encoding::{decode, encode, insert_every, DEFAULT_SEPARATOR};
pub use generator::{Clock, IdGenerator, SystemClock};
