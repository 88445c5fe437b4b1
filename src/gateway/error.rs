//! Gateway error taxonomy and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::crypto::CryptoError;
use crate::legacy::CodecError;

/// Everything that can go wrong inside a gateway operation.
///
/// `NotFound` is a normal outcome surfaced to the client, not a system
/// fault. `Codec` and `Decryption` indicate a bug or data corruption and
/// are reported as internal errors with operator-grade detail; the
/// detail never contains the protected plaintext or key material.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("missing or invalid credential")]
    Unauthorized,

    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    #[error("`{0}` is not a valid client id")]
    InvalidId(String),

    #[error("{0}")]
    NotFound(String),

    #[error("legacy protocol error: {0}")]
    Codec(#[from] CodecError),

    #[error("protected field could not be decrypted: {0}")]
    Decryption(#[source] CryptoError),

    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::MissingField(_) | GatewayError::InvalidId(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Codec(_) | GatewayError::Decryption(_) | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            GatewayError::Unauthorized => {
                json!({ "erro": "Não autorizado. Token inválido ou ausente." })
            }
            GatewayError::MissingField(_) => json!({ "erro": "Dados incompletos" }),
            GatewayError::InvalidId(_) => json!({ "erro": "Identificador inválido" }),
            GatewayError::NotFound(message) => json!({ "mensagem": message }),
            GatewayError::Codec(_) | GatewayError::Decryption(_) | GatewayError::Internal(_) => {
                tracing::error!(error = %self, "Gateway operation failed");
                json!({ "erro": "Erro interno no middleware", "detalhe": self.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}
