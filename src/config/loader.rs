//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GateConfig;
use crate::config::validation::{validate_config, ValidationError};

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
pub fn parse_config(content: &str) -> Result<GateConfig, ConfigError> {
    let config: GateConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GateConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_config() {
        let config = parse_config(
            r#"
            [access]
            public_prefixes = ["/login", "/help"]
            login_path = "/login"
            "#,
        )
        .unwrap();
        assert_eq!(config.access.public_prefixes.len(), 2);
    }

    #[test]
    fn test_example_config_is_valid() {
        let config = parse_config(include_str!("../../route-gate.toml")).unwrap();
        assert!(!config.access.dev_bypass);
        assert_eq!(config.shell.bare_patterns, vec!["/worker/contracts/{id}"]);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[access\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_message_lists_all() {
        let err = parse_config(
            r#"
            [access]
            public_prefixes = []
            redirect_param = ""
            "#,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("login_path"));
        assert!(message.contains("redirect_param"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/route-gate.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
