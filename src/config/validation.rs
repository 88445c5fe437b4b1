//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones. Returns every
//! violation, not just the first, so an operator can fix a config file
//! in one pass.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic violation in a config file.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("auth.bearer_token must not be empty")]
    EmptyBearerToken,

    #[error("crypto.passphrase must not be empty")]
    EmptyPassphrase,

    #[error("crypto.salt must not be empty")]
    EmptySalt,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("observability.metrics_address `{0}` is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting all violations.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.auth.bearer_token.is_empty() {
        errors.push(ValidationError::EmptyBearerToken);
    }

    if config.crypto.passphrase.is_empty() {
        errors.push(ValidationError::EmptyPassphrase);
    }

    if config.crypto.salt.is_empty() {
        errors.push(ValidationError::EmptySalt);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
