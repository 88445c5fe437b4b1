//! Typed model of the legacy XML dialect.
//!
//! The protocol is a closed set: two request shapes and three response
//! shapes. Field values are carried as opaque strings; numeric ids are
//! parsed by the consumer, not here. The protected field is ciphertext
//! by the time it enters any of these variants.

/// A request the legacy system accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyRequest {
    /// Root element `cadastro`: append a customer record.
    Register {
        name: String,
        email: String,
        protected_cpf: String,
    },

    /// Root element `consulta`: look up a record by id.
    Lookup { id: String },
}

/// A reply the legacy system produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyResponse {
    /// Root element `resposta`: a registration was appended.
    Accepted {
        status: String,
        id: String,
        message: String,
    },

    /// Root element `cliente`: a lookup matched a record.
    Record {
        id: String,
        name: String,
        email: String,
        protected_cpf: String,
    },

    /// Root element `erro`: a lookup matched nothing.
    Rejected { message: String },
}

impl LegacyResponse {
    /// Wire root element for this variant, for diagnostics.
    pub fn root(&self) -> &'static str {
        match self {
            LegacyResponse::Accepted { .. } => "resposta",
            LegacyResponse::Record { .. } => "cliente",
            LegacyResponse::Rejected { .. } => "erro",
        }
    }
}
