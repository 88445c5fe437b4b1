//! Legacy collaborator subsystem.
//!
//! # Data Flow
//! ```text
//! gateway pipeline
//!     → message.rs (typed request variants)
//!     → codec.rs (encode to the XML dialect)
//!     → store.rs (the XML-only backend boundary)
//!     → codec.rs (decode the XML reply)
//!     → message.rs (typed response variants)
//! ```
//!
//! The legacy system accepts nothing but XML strings; [`LegacyBackend`]
//! is the only seam the rest of the crate sees.

pub mod codec;
pub mod message;
pub mod store;

pub use codec::CodecError;
pub use message::{LegacyRequest, LegacyResponse};
pub use store::{InMemoryLegacyStore, LegacyBackend};
