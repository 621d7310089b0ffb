//! Small generic helpers shared by services.

pub mod options;
pub mod slices;
pub mod strings;

pub use options::bool_to_int;
pub use slices::{contains, subtract};
pub use strings::split_by_limit;
