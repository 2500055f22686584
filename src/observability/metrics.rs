//! Metrics collection and exposition.
//!
//! # Metrics
//! - `locale_router_decisions_total` (counter): decisions by kind
//! - `locale_router_decision_duration_seconds` (histogram): time to decide
//! - `locale_router_upstream_errors_total` (counter): failed content forwards
//! - `locale_router_reloads_total` (counter): config reloads by outcome
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Labels are low-cardinality (decision kind, outcome), never locales or paths

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one routing decision.
pub fn record_decision(kind: &'static str, start: Instant) {
    metrics::counter!("locale_router_decisions_total", "decision" => kind).increment(1);
    metrics::histogram!("locale_router_decision_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_error() {
    metrics::counter!("locale_router_upstream_errors_total").increment(1);
}

pub fn record_reload(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!("locale_router_reloads_total", "outcome" => outcome).increment(1);
}
