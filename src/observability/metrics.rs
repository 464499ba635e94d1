//! Metrics collection and exposition.
//!
//! # Metrics
//! - `todo_http_requests_total` (counter): requests by route, status
//! - `todo_http_request_duration_seconds` (histogram): latency by route
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no-ops until a recorder is installed
//! - Prometheus exporter is opt-in via config

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Request counter metric name.
pub const METRIC_REQUESTS_TOTAL: &str = "todo_http_requests_total";
/// Request latency metric name.
pub const METRIC_REQUEST_DURATION: &str = "todo_http_request_duration_seconds";

/// Install the Prometheus exporter on `addr` and register metric descriptions.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!(METRIC_REQUESTS_TOTAL, "Total HTTP requests by route and status");
            describe_histogram!(
                METRIC_REQUEST_DURATION,
                "HTTP request latency in seconds by route"
            );
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(error) => {
            tracing::error!(address = %addr, %error, "Failed to install metrics exporter");
        }
    }
}

/// Record one completed request.
pub fn record_request(route: &'static str, status: u16, elapsed: Duration) {
    counter!(METRIC_REQUESTS_TOTAL, "route" => route, "status" => status.to_string()).increment(1);
    histogram!(METRIC_REQUEST_DURATION, "route" => route).record(elapsed.as_secs_f64());
}
