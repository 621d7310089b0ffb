//! Configuration validation.
//!
//! Returns every problem found, not just the first.

use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::KitConfig;

/// A single semantic problem in a [`KitConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("logging.level '{0}' is not a valid filter")]
    LogLevel(String),

    #[error("transaction.header '{0}' is not a valid header name")]
    TransactionHeader(String),

    #[error("hid.separator '{0}' must not be a letter or digit")]
    Separator(char),
}

/// Check a config for semantic errors.
pub fn validate_config(config: &KitConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if EnvFilter::try_new(&config.logging.level).is_err() {
        errors.push(ValidationError::LogLevel(config.logging.level.clone()));
    }

    if HeaderName::try_from(config.transaction.header.as_str()).is_err() {
        errors.push(ValidationError::TransactionHeader(config.transaction.header.clone()));
    }

    if let Some(separator) = config.hid.separator {
        if separator.is_ascii_alphanumeric() {
            errors.push(ValidationError::Separator(separator));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
