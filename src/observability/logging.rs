//! Structured logging.
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - `RUST_LOG` wins; the configured level is the fallback default

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// `default_level` comes from configuration and applies when `RUST_LOG`
/// is unset.
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "legacy_gateway={default_level},tower_http={default_level}"
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
