//! JSON/HTTP gateway for an XML-speaking legacy customer store.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client (JSON/HTTP)
//!        │
//!        ▼
//!   ┌─────────┐   ┌────────────┐   ┌──────────┐   ┌───────────────┐
//!   │  http   │──▶│ auth gate  │──▶│ gateway  │──▶│ legacy codec  │
//!   │ server  │   │(credential)│   │ pipeline │   │  (JSON↔XML)   │
//!   └─────────┘   └────────────┘   └────┬─────┘   └──────┬────────┘
//!                                       │                │ XML only
//!                                  ┌────▼─────┐   ┌──────▼────────┐
//!                                  │  crypto  │   │ legacy store  │
//!                                  │ (field)  │   │ (ciphertext)  │
//!                                  └──────────┘   └───────────────┘
//! ```
//!
//! The protected client field is encrypted before it reaches the legacy
//! dialect and decrypted only when shaping the authorized client
//! response; it is never plaintext on the simulated wire or in the
//! store.

pub mod auth;
pub mod config;
pub mod crypto;
pub mod gateway;
pub mod http;
pub mod legacy;
pub mod observability;

pub use config::GatewayConfig;
pub use crypto::FieldCipher;
pub use gateway::Gateway;
pub use http::HttpServer;
pub use legacy::InMemoryLegacyStore;
