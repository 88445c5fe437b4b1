//! Credential verification.
//!
//! # Responsibilities
//! - Define the pluggable credential-check capability
//! - Ship the shared-secret strategy used by the default deployment
//! - Enforce the check as middleware before every gateway operation
//!
//! # Design Decisions
//! - The pipeline never sees credentials; a denied request is rejected
//!   here and no downstream component runs
//! - Strategies are trait objects so a token-service verifier can be
//!   swapped in without touching the pipeline

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::gateway::error::GatewayError;
use crate::http::server::AppState;

/// Outcome of a credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Authorized,
    Denied,
}

/// Pluggable credential-check capability.
///
/// `credential` is the raw `Authorization` header value, if the client
/// sent one.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, credential: Option<&str>) -> AuthDecision;
}

/// Verifier comparing the header against a configured bearer token.
pub struct SharedSecretVerifier {
    expected: String,
}

impl SharedSecretVerifier {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            expected: format!("Bearer {}", token.into()),
        }
    }
}

impl CredentialVerifier for SharedSecretVerifier {
    fn verify(&self, credential: Option<&str>) -> AuthDecision {
        match credential {
            Some(value) if value == self.expected => AuthDecision::Authorized,
            _ => AuthDecision::Denied,
        }
    }
}

/// Middleware running the configured verifier before every route.
pub async fn require_credential(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let credential = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match state.verifier.verify(credential) {
        AuthDecision::Authorized => next.run(request).await,
        AuthDecision::Denied => {
            tracing::warn!(path = %request.uri().path(), "Request rejected by credential check");
            GatewayError::Unauthorized.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_bearer_token_is_authorized() {
        let verifier = SharedSecretVerifier::new("123");
        assert_eq!(verifier.verify(Some("Bearer 123")), AuthDecision::Authorized);
    }

    #[test]
    fn wrong_or_missing_credential_is_denied() {
        let verifier = SharedSecretVerifier::new("123");
        assert_eq!(verifier.verify(Some("Bearer 999")), AuthDecision::Denied);
        assert_eq!(verifier.verify(Some("123")), AuthDecision::Denied);
        assert_eq!(verifier.verify(None), AuthDecision::Denied);
    }
}
