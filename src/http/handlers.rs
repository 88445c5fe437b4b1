//! JSON handlers for the two gateway operations.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::gateway::{ClientRecord, GatewayError, RegisterClientRequest, RegistrationAccepted};
use crate::http::server::AppState;
use crate::observability::metrics;

/// `POST /api/clientes`
pub async fn register_client(
    State(state): State<AppState>,
    Json(body): Json<RegisterClientRequest>,
) -> Result<Json<RegistrationAccepted>, GatewayError> {
    let start = Instant::now();

    match state.gateway.register(body) {
        Ok(accepted) => {
            metrics::record_request("register", 200, start);
            Ok(Json(accepted))
        }
        Err(error) => {
            metrics::record_request("register", error.status().as_u16(), start);
            Err(error)
        }
    }
}

/// `GET /api/clientes/{id}`
pub async fn lookup_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClientRecord>, GatewayError> {
    let start = Instant::now();

    match state.gateway.lookup(&id) {
        Ok(record) => {
            metrics::record_request("lookup", 200, start);
            Ok(Json(record))
        }
        Err(error) => {
            metrics::record_request("lookup", error.status().as_u16(), start);
            Err(error)
        }
    }
}
