//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → KitConfig (validated, immutable)
//!     → handed to logging, middleware and the ID generator at startup
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - No hot reload; services read config once at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, parse_config, ConfigError, CONFIG_PATH_ENV};
pub use schema::{
    HidConfig, KitConfig, LogFormat, LoggingConfig, RequestLogConfig, ServerConfig,
    TransactionConfig,
};
pub use validation::{validate_config, ValidationError};
