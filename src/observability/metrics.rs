//! Metrics collection and exposition.
//!
//! # Metrics
//! - `posts_requests_total` (counter): requests by method, route, status
//! - `posts_request_duration_seconds` (histogram): latency by method, route
//! - `posts_created_total` (counter): successful creates
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Unmatched requests are labelled with route `none`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    metrics::counter!(
        "posts_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "posts_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a created post.
pub fn record_post_created() {
    metrics::counter!("posts_created_total").increment(1);
}
