//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): inbound requests by service, method,
//!   status
//! - `relay_request_duration_seconds` (histogram): inbound latency
//! - `relay_upstream_calls_total` (counter): outbound call outcomes by
//!   target (success / timeout / error)
//! - `relay_secondary_outcomes_total` (counter): shielded side-effect
//!   outcomes by task

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exposition listener.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "failed to install metrics exporter"),
    }
}

/// Record an inbound request's terminal status and latency.
pub fn record_request(service: &'static str, method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "relay_requests_total",
        "service" => service,
        "method" => method.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    metrics::histogram!("relay_request_duration_seconds", "service" => service)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of one outbound bounded call.
pub fn record_upstream(target: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "relay_upstream_calls_total",
        "target" => target,
        "outcome" => outcome,
    )
    .increment(1);
    metrics::histogram!("relay_upstream_duration_seconds", "target" => target)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of a shielded secondary side effect.
pub fn record_secondary(task: &'static str, outcome: &'static str) {
    metrics::counter!(
        "relay_secondary_outcomes_total",
        "task" => task,
        "outcome" => outcome,
    )
    .increment(1);
}
