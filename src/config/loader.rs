//! Configuration loading from disk.

use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_violations(.0))]
    Validation(Vec<ValidationError>),
}

fn format_violations(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn sections_override_defaults() {
        let toml = r#"
            [listener]
            bind_address = "127.0.0.1:8088"

            [auth]
            bearer_token = "s3cret"

            [crypto]
            passphrase = "operator-passphrase"
            salt = "operator-salt"
        "#;
        let config: GatewayConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8088");
        assert_eq!(config.auth.bearer_token, "s3cret");
        assert_eq!(config.crypto.passphrase, "operator-passphrase");
        assert_eq!(config.crypto.salt, "operator-salt");
    }
}
