//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::KitConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "BACKEND_KIT_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<KitConfig, ConfigError> {
    let config: KitConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<KitConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load from the file named by [`CONFIG_PATH_ENV`], or defaults when unset.
pub fn load_from_env() -> Result<KitConfig, ConfigError> {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) => load_config(Path::new(&path)),
        None => Ok(KitConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config, KitConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [server]
            bind_address = "127.0.0.1:9000"

            [logging]
            format = "text"
            level = "info"
            show_traces = true

            [transaction]
            header = "x-transaction-id"

            [request_log]
            excluded_uris = ["/login", "/health"]

            [hid]
            include_uppercase = true
            group_size = 4
            separator = "_"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind_address, "127.0.0.1:9000");
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.logging.show_traces);
        assert_eq!(config.transaction.header, "x-transaction-id");
        assert_eq!(config.request_log.excluded_uris.len(), 2);
        assert_eq!(config.hid.separator, Some('_'));
        assert_eq!(config.hid.group_size, 4);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[server\nbind_address = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_all_problems() {
        let err = parse_config(
            r#"
            [server]
            bind_address = "not-an-address"
            request_timeout_secs = 0
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
