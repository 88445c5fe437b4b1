//! The legacy record store, reachable only through its XML protocol.
//!
//! # Responsibilities
//! - Decode incoming wire requests and encode wire replies
//! - Append customer records with monotonic 1-based ids
//! - Serve exact-match lookups; absence is a normal reply, not a fault
//!
//! The store simulates the old backend in-process. Everything it keeps
//! is already ciphertext in the protected field; it never sees plaintext.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::legacy::codec::{self, CodecError};
use crate::legacy::message::{LegacyRequest, LegacyResponse};

/// Reply text for a successful registration, verbatim from the legacy
/// system's contract.
pub const REGISTERED_MESSAGE: &str = "Cliente processado pelo legado.";

/// Reply text when a lookup matches nothing.
pub const NOT_FOUND_MESSAGE: &str = "Cliente nao encontrado";

/// A customer record as the legacy system stores it.
///
/// `protected_cpf` holds the encrypted token; the store has no key and
/// no way to read the field.
#[derive(Debug, Clone)]
pub struct CustomerRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub protected_cpf: String,
}

/// The wire-level boundary to the legacy collaborator.
///
/// One XML document in, one XML document out. The gateway pipeline
/// depends on this trait only, so tests can interpose on the simulated
/// wire and a future remote backend can slot in without touching the
/// pipeline.
pub trait LegacyBackend: Send + Sync {
    fn exchange(&self, xml: &str) -> Result<String, CodecError>;
}

/// In-memory legacy store.
///
/// Id assignment is a single `fetch_add`, so concurrent registrations
/// get distinct gap-free ids; records live in a concurrent map, so
/// lookups never observe a partially appended record.
#[derive(Debug, Default)]
pub struct InMemoryLegacyStore {
    records: DashMap<u64, CustomerRecord>,
    next_id: AtomicU64,
}

impl InMemoryLegacyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, assigning the next sequential id.
    fn register(&self, name: String, email: String, protected_cpf: String) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.records.insert(
            id,
            CustomerRecord {
                id,
                name,
                email,
                protected_cpf,
            },
        );
        id
    }

    /// Exact-match lookup by id.
    fn lookup(&self, id: u64) -> Option<CustomerRecord> {
        self.records.get(&id).map(|record| record.value().clone())
    }

    /// Number of records held. Used by tests to assert that denied
    /// requests caused no state change.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LegacyBackend for InMemoryLegacyStore {
    fn exchange(&self, xml: &str) -> Result<String, CodecError> {
        let response = match codec::decode_request(xml)? {
            LegacyRequest::Register {
                name,
                email,
                protected_cpf,
            } => {
                let id = self.register(name, email, protected_cpf);
                tracing::debug!(id, "Legacy store appended record");
                LegacyResponse::Accepted {
                    status: "sucesso".into(),
                    id: id.to_string(),
                    message: REGISTERED_MESSAGE.into(),
                }
            }
            LegacyRequest::Lookup { id } => {
                // The id arrives as opaque text; anything non-numeric
                // matches no record, same as an unknown id.
                match id.trim().parse::<u64>().ok().and_then(|id| self.lookup(id)) {
                    Some(record) => LegacyResponse::Record {
                        id: record.id.to_string(),
                        name: record.name,
                        email: record.email,
                        protected_cpf: record.protected_cpf,
                    },
                    None => LegacyResponse::Rejected {
                        message: NOT_FOUND_MESSAGE.into(),
                    },
                }
            }
        };

        Ok(codec::encode_response(&response))
    }
}
