//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by operation, status
//! - `gateway_request_duration_seconds` (histogram): latency by operation

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    if let Err(error) = builder.install() {
        tracing::error!(%error, "Failed to install Prometheus metrics exporter");
    } else {
        tracing::info!(address = %addr, "Metrics exporter listening");
    }
}

/// Record one completed gateway operation.
pub fn record_request(operation: &'static str, status: u16, start: Instant) {
    counter!(
        "gateway_requests_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "gateway_request_duration_seconds",
        "operation" => operation
    )
    .record(start.elapsed().as_secs_f64());
}
