//! Client-facing request and response shapes.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/clientes`.
///
/// Fields are optional at the serde layer so that missing data surfaces
/// as a gateway validation error rather than a deserialization
/// rejection. `nome` is accepted as an alias for clients of the old
/// surface.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterClientRequest {
    #[serde(alias = "nome")]
    pub name: Option<String>,

    pub email: Option<String>,

    pub cpf: Option<String>,
}

/// Successful reply to a registration.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationAccepted {
    pub status: String,

    pub id: u64,

    #[serde(rename = "mensagem")]
    pub message: String,
}

/// Successful reply to a lookup, with the protected field decrypted.
#[derive(Debug, Clone, Serialize)]
pub struct ClientRecord {
    pub id: u64,

    #[serde(rename = "nome")]
    pub name: String,

    pub email: String,

    pub cpf: String,
}
