//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hubs_http_requests_total` (counter): requests by method, route, status
//! - `hubs_http_request_duration_seconds` (histogram): latency distribution
//! - `hubs_store_size` (gauge): hubs currently stored

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a completed request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("hubs_http_requests_total", &labels[..]).increment(1);
    metrics::histogram!("hubs_http_request_duration_seconds", &labels[..])
        .record(start.elapsed().as_secs_f64());
}

pub fn record_store_size(size: usize) {
    metrics::gauge!("hubs_store_size").set(size as f64);
}

/// Route-layer middleware timing each request.
///
/// Labels use the matched route template so `/hubs/{id}` stays one series.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let method = request.method().to_string();

    let response = next.run(request).await;

    record_request(&method, &path, response.status().as_u16(), start);
    response
}
