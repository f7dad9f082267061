//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gate_decisions_total` (counter): gate outcomes by decision
//! - `gate_requests_total` (counter): forwarded requests by status
//! - `gate_request_duration_seconds` (histogram): upstream round trip

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_decision(decision: &'static str) {
    counter!("gate_decisions_total", "decision" => decision).increment(1);
}

pub fn record_request(status: u16, start: Instant) {
    counter!("gate_requests_total", "status" => status.to_string()).increment(1);
    histogram!("gate_request_duration_seconds").record(start.elapsed().as_secs_f64());
}
