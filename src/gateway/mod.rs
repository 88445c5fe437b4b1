//! Gateway pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! JSON request (already authenticated)
//!     → types.rs (client-facing request shapes)
//!     → pipeline.rs (validate → encrypt/decrypt → codec → legacy store)
//!     → types.rs (client-facing response shapes)
//! ```

pub mod error;
pub mod pipeline;
pub mod types;

pub use error::GatewayError;
pub use pipeline::Gateway;
pub use types::{ClientRecord, RegisterClientRequest, RegistrationAccepted};
