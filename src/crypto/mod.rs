//! Field-level encryption subsystem.
//!
//! # Responsibilities
//! - Derive the process-wide encryption key from configured secrets
//! - Encrypt/decrypt the protected client field
//! - Define the wire token format for encrypted values

pub mod cipher;

pub use cipher::{CryptoError, FieldCipher, NONCE_LEN};
