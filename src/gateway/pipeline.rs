//! Per-request translation pipelines.
//!
//! # Responsibilities
//! - Validate client input before any legacy interaction
//! - Encrypt the protected field on the way in, decrypt it on the way out
//! - Drive the codec and the legacy boundary, single pass, no retries
//!
//! The protected field is plaintext in exactly two places: the inbound
//! registration request before encryption and the outbound lookup
//! response after decryption. Everything between (the wire, the store,
//! the intermediate state here) carries ciphertext.

use std::sync::Arc;

use crate::crypto::FieldCipher;
use crate::gateway::error::GatewayError;
use crate::gateway::types::{ClientRecord, RegisterClientRequest, RegistrationAccepted};
use crate::legacy::codec;
use crate::legacy::{LegacyBackend, LegacyRequest, LegacyResponse};

/// The translation gateway.
#[derive(Clone)]
pub struct Gateway {
    cipher: FieldCipher,
    backend: Arc<dyn LegacyBackend>,
}

impl Gateway {
    pub fn new(cipher: FieldCipher, backend: Arc<dyn LegacyBackend>) -> Self {
        Self { cipher, backend }
    }

    /// Register a client: validate → encrypt → legacy `cadastro` →
    /// client-facing acceptance.
    pub fn register(
        &self,
        request: RegisterClientRequest,
    ) -> Result<RegistrationAccepted, GatewayError> {
        let name = required(request.name, "name")?;
        let cpf = required(request.cpf, "cpf")?;
        let email = request.email.unwrap_or_default();

        let protected_cpf = self
            .cipher
            .encrypt(&cpf)
            .map_err(|e| GatewayError::Internal(format!("field encryption failed: {e}")))?;

        let wire = codec::encode_request(&LegacyRequest::Register {
            name,
            email,
            protected_cpf,
        });
        tracing::debug!(bytes = wire.len(), "Sending registration to legacy system");

        let reply = self.backend.exchange(&wire)?;
        match codec::decode_response(&reply)? {
            LegacyResponse::Accepted {
                status,
                id,
                message,
            } => {
                let id = parse_legacy_id(&id)?;
                tracing::info!(id, "Client registered");
                Ok(RegistrationAccepted {
                    status,
                    id,
                    message,
                })
            }
            // The store never rejects a registration today; if that
            // contract ever changes this surfaces as an internal error
            // instead of a crash.
            other => {
                tracing::error!(reply = other.root(), "Unexpected legacy reply to a registration");
                Err(GatewayError::Internal(
                    "legacy system returned an unexpected reply to a registration".into(),
                ))
            }
        }
    }

    /// Look up a client by id: validate → legacy `consulta` → decrypt →
    /// client-facing record.
    pub fn lookup(&self, raw_id: &str) -> Result<ClientRecord, GatewayError> {
        let id: u64 = raw_id
            .trim()
            .parse()
            .map_err(|_| GatewayError::InvalidId(raw_id.to_string()))?;

        let wire = codec::encode_request(&LegacyRequest::Lookup { id: id.to_string() });
        let reply = self.backend.exchange(&wire)?;

        match codec::decode_response(&reply)? {
            LegacyResponse::Record {
                id,
                name,
                email,
                protected_cpf,
            } => {
                let id = parse_legacy_id(&id)?;
                let cpf = self
                    .cipher
                    .decrypt(&protected_cpf)
                    .map_err(GatewayError::Decryption)?;
                Ok(ClientRecord {
                    id,
                    name,
                    email,
                    cpf,
                })
            }
            LegacyResponse::Rejected { message } => {
                tracing::debug!(id, "Lookup matched no record");
                Err(GatewayError::NotFound(message))
            }
            LegacyResponse::Accepted { .. } => Err(GatewayError::Internal(
                "legacy system returned a registration reply to a lookup".into(),
            )),
        }
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, GatewayError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(GatewayError::MissingField(field)),
    }
}

fn parse_legacy_id(id: &str) -> Result<u64, GatewayError> {
    id.parse()
        .map_err(|_| GatewayError::Internal(format!("legacy system returned a non-numeric id `{id}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy::{CodecError, InMemoryLegacyStore};
    use std::sync::Mutex;

    /// Backend wrapper recording every XML document crossing the wire.
    struct RecordingBackend {
        inner: InMemoryLegacyStore,
        traffic: Mutex<Vec<String>>,
    }

    impl RecordingBackend {
        fn new() -> Self {
            Self {
                inner: InMemoryLegacyStore::new(),
                traffic: Mutex::new(Vec::new()),
            }
        }

        fn traffic(&self) -> Vec<String> {
            self.traffic.lock().unwrap().clone()
        }
    }

    impl LegacyBackend for RecordingBackend {
        fn exchange(&self, xml: &str) -> Result<String, CodecError> {
            self.traffic.lock().unwrap().push(xml.to_owned());
            let reply = self.inner.exchange(xml)?;
            self.traffic.lock().unwrap().push(reply.clone());
            Ok(reply)
        }
    }

    /// Backend producing a fixed reply regardless of the request.
    struct CannedBackend(String);

    impl LegacyBackend for CannedBackend {
        fn exchange(&self, _xml: &str) -> Result<String, CodecError> {
            Ok(self.0.clone())
        }
    }

    fn test_cipher() -> FieldCipher {
        FieldCipher::from_passphrase("pipeline-passphrase", "pipeline-salt").unwrap()
    }

    fn register_request(name: &str, email: Option<&str>, cpf: &str) -> RegisterClientRequest {
        RegisterClientRequest {
            name: Some(name.into()),
            email: email.map(Into::into),
            cpf: Some(cpf.into()),
        }
    }

    #[test]
    fn register_then_lookup_round_trips_the_protected_field() {
        let backend = Arc::new(RecordingBackend::new());
        let gateway = Gateway::new(test_cipher(), backend.clone());

        let accepted = gateway
            .register(register_request("Ana", Some("a@x.com"), "123.456.789-00"))
            .unwrap();
        assert_eq!(accepted.status, "sucesso");
        assert_eq!(accepted.id, 1);

        let record = gateway.lookup("1").unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.name, "Ana");
        assert_eq!(record.email, "a@x.com");
        assert_eq!(record.cpf, "123.456.789-00");
    }

    #[test]
    fn protected_field_is_never_plaintext_on_the_wire() {
        let backend = Arc::new(RecordingBackend::new());
        let gateway = Gateway::new(test_cipher(), backend.clone());

        let cpf = "123.456.789-00";
        gateway
            .register(register_request("Ana", None, cpf))
            .unwrap();
        gateway.lookup("1").unwrap();

        let traffic = backend.traffic();
        assert!(!traffic.is_empty());
        for document in traffic {
            assert!(
                !document.contains(cpf),
                "plaintext cpf leaked onto the wire: {document}"
            );
        }
    }

    #[test]
    fn missing_required_fields_are_rejected_before_the_legacy_call() {
        let backend = Arc::new(RecordingBackend::new());
        let gateway = Gateway::new(test_cipher(), backend.clone());

        let no_name = RegisterClientRequest {
            name: None,
            email: None,
            cpf: Some("111".into()),
        };
        assert!(matches!(
            gateway.register(no_name),
            Err(GatewayError::MissingField("name"))
        ));

        let blank_cpf = RegisterClientRequest {
            name: Some("Ana".into()),
            email: None,
            cpf: Some("   ".into()),
        };
        assert!(matches!(
            gateway.register(blank_cpf),
            Err(GatewayError::MissingField("cpf"))
        ));

        assert!(backend.traffic().is_empty(), "legacy system was contacted");
    }

    #[test]
    fn non_numeric_id_is_rejected_before_the_legacy_call() {
        let backend = Arc::new(RecordingBackend::new());
        let gateway = Gateway::new(test_cipher(), backend.clone());

        assert!(matches!(
            gateway.lookup("abc"),
            Err(GatewayError::InvalidId(_))
        ));
        assert!(backend.traffic().is_empty());
    }

    #[test]
    fn unknown_id_surfaces_the_legacy_message() {
        let backend = Arc::new(InMemoryLegacyStore::new());
        let gateway = Gateway::new(test_cipher(), backend);

        match gateway.lookup("999") {
            Err(GatewayError::NotFound(message)) => {
                assert_eq!(message, "Cliente nao encontrado")
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn corrupted_stored_token_is_a_decryption_error_not_a_not_found() {
        let reply = codec::encode_response(&LegacyResponse::Record {
            id: "1".into(),
            name: "Ana".into(),
            email: String::new(),
            protected_cpf: "00aa:deadbeef".into(),
        });
        let gateway = Gateway::new(test_cipher(), Arc::new(CannedBackend(reply)));

        assert!(matches!(
            gateway.lookup("1"),
            Err(GatewayError::Decryption(_))
        ));
    }

    #[test]
    fn unexpected_reply_shape_on_registration_is_internal() {
        let reply = codec::encode_response(&LegacyResponse::Rejected {
            message: "Cliente nao encontrado".into(),
        });
        let gateway = Gateway::new(test_cipher(), Arc::new(CannedBackend(reply)));

        assert!(matches!(
            gateway.register(register_request("Ana", None, "111")),
            Err(GatewayError::Internal(_))
        ));
    }

    #[test]
    fn malformed_legacy_reply_is_a_codec_error() {
        let gateway = Gateway::new(
            test_cipher(),
            Arc::new(CannedBackend("<sopa><x>1</x></sopa>".into())),
        );

        assert!(matches!(
            gateway.lookup("1"),
            Err(GatewayError::Codec(_))
        ));
    }
}
