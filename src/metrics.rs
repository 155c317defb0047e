//! Prometheus metrics for HTTP traffic.
//!
//! Every request passing through the router is counted by method, matched
//! route and status, and its latency recorded in milliseconds.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::AppError;

// === Metric Name Constants ===

/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Rate-limited requests counter metric name.
pub const METRIC_RATE_LIMITED: &str = "http_requests_rate_limited_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests handled");
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(
        METRIC_RATE_LIMITED,
        "Total number of requests rejected by the rate limiter"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return its render handle.
pub fn install_recorder() -> Result<PrometheusHandle, AppError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Record one handled request.
pub fn record_http_request(method: &str, path: &str, status: u16, start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    let status = status.to_string();

    counter!(
        METRIC_HTTP_REQUESTS,
        "method" => method.to_owned(),
        "path" => path.to_owned(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "method" => method.to_owned(),
        "path" => path.to_owned(),
        "status" => status
    )
    .record(latency_ms);
}

/// Increment rate-limited counter.
pub fn inc_rate_limited() {
    counter!(METRIC_RATE_LIMITED).increment(1);
}

/// Middleware recording [`METRIC_HTTP_REQUESTS`] and [`METRIC_HTTP_REQUEST_LATENCY`].
pub async fn track_http_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    // Unmatched paths share one label to keep cardinality bounded.
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(req).await;
    record_http_request(&method, &path, response.status().as_u16(), start);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_noop() {
        // No global recorder installed in unit tests; calls must not panic.
        record_http_request("GET", "/health", 200, Instant::now());
        inc_rate_limited();
    }
}
