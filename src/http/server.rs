//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with both gateway routes
//! - Wire up middleware (credential check, timeout, request ID, tracing)
//! - Bind the server to a listener and serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::{self, CredentialVerifier, SharedSecretVerifier};
use crate::config::GatewayConfig;
use crate::gateway::Gateway;
use crate::http::handlers;
use crate::http::request::RequestIdLayer;

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and
    /// pipeline.
    pub fn new(config: GatewayConfig, gateway: Gateway) -> Self {
        let verifier: Arc<dyn CredentialVerifier> =
            Arc::new(SharedSecretVerifier::new(config.auth.bearer_token.clone()));

        let state = AppState {
            gateway: Arc::new(gateway),
            verifier,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The credential check is a route layer so it runs after routing
    /// but before either handler; unmatched paths 404 without touching
    /// the verifier.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/clientes", post(handlers::register_client))
            .route("/api/clientes/{id}", get(handlers::lookup_client))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_credential,
            ))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
