//! Prometheus metrics infrastructure
//!
//! Without an installed recorder every metric call is a no-op, so handlers
//! can record unconditionally.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Install the Prometheus exporter on `0.0.0.0:<port>`.
///
/// # Example
///
/// ```ignore
/// observability::init_metrics(9100)?;
/// // Metrics available at http://localhost:9100/metrics
/// ```
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

/// Metrics for the quote endpoints
///
/// # Metrics
///
/// * `quote_requests_total{service, endpoint, status}` - Requests handled
/// * `quote_request_duration_seconds{service, endpoint}` - Time spent per request
/// * `quote_auth_rejected_total{service}` - Requests refused by the token guard
/// * `quote_upstream_failures_total{service, kind}` - Failed price board lookups
#[derive(Debug, Clone)]
pub struct QuoteMetrics {
    service: String,
}

impl QuoteMetrics {
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    /// Record a finished request on `endpoint` with its HTTP status.
    pub fn record_request(&self, endpoint: &'static str, duration: Duration, status: u16) {
        counter!(
            "quote_requests_total",
            "service" => self.service.clone(),
            "endpoint" => endpoint,
            "status" => status.to_string()
        )
        .increment(1);
        histogram!(
            "quote_request_duration_seconds",
            "service" => self.service.clone(),
            "endpoint" => endpoint
        )
        .record(duration.as_secs_f64());
    }

    pub fn record_auth_rejected(&self) {
        counter!("quote_auth_rejected_total", "service" => self.service.clone()).increment(1);
    }

    /// Record an upstream failure by error kind (`Transport`, `Status`, `Schema`, ...).
    pub fn record_upstream_failure(&self, kind: &'static str) {
        counter!(
            "quote_upstream_failures_total",
            "service" => self.service.clone(),
            "kind" => kind
        )
        .increment(1);
    }

    pub fn service(&self) -> &str {
        &self.service
    }
}
