//! Date helpers.
//!
//! # Design Decisions
//! - Day comparison uses each timestamp's own time zone
//! - Format translation targets chrono `strftime` and never emits an
//!   unknown specifier, so formatting with the result cannot fail

pub mod day;
pub mod format;

pub use day::matches_day;
pub use format::{format_moment, translate};
