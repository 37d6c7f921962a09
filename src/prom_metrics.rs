//! # Prometheus Metrics — Exposition for Scraping
//!
//! Operational metrics for the lead-capture service in the Prometheus text
//! exposition format.
//!
//! ## Metrics Exposed
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `renovate_http_request_duration_seconds` | Histogram | `method`, `path` | Request latency |
//! | `renovate_records_created_total` | Counter | `kind` | Stored contacts, consultations, cost estimates |
//! | `renovate_estimates_served_total` | Counter | — | Breakdowns computed by `POST /api/estimate` |
//! | `renovate_notification_failures_total` | Counter | — | Failed contact webhook deliveries |
//!
//! The `/metrics` endpoint renders the current registry state on each scrape.

use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::histogram::{exponential_buckets, Histogram};
use prometheus_client::registry::Registry;

/// Label set for request latency. `path` has ids collapsed to placeholders.
#[derive(Clone, Debug, Hash, PartialEq, Eq, prometheus_client::encoding::EncodeLabelSet)]
pub struct HttpLabel {
    pub method: String,
    pub path: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, prometheus_client::encoding::EncodeLabelSet)]
pub struct RecordLabel {
    pub kind: String,
}

/// Thread-safe metrics registry. Every metric handle is cheap to clone and
/// shares state with the registered original.
pub struct Metrics {
    pub registry: Registry,
    pub http_request_duration: Family<HttpLabel, Histogram>,
    pub records_created: Family<RecordLabel, Counter>,
    pub estimates_served: Counter,
    pub notification_failures: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let http_request_duration =
            Family::<HttpLabel, Histogram>::new_with_constructor(|| {
                Histogram::new(exponential_buckets(0.0005, 2.0, 14))
            });
        registry.register(
            "renovate_http_request_duration_seconds",
            "HTTP request latency by method and normalized path",
            http_request_duration.clone(),
        );

        let records_created = Family::<RecordLabel, Counter>::default();
        registry.register(
            "renovate_records_created",
            "Records stored by kind",
            records_created.clone(),
        );

        let estimates_served = Counter::default();
        registry.register(
            "renovate_estimates_served",
            "Cost breakdowns computed on request",
            estimates_served.clone(),
        );

        let notification_failures = Counter::default();
        registry.register(
            "renovate_notification_failures",
            "Contact webhook deliveries that failed",
            notification_failures.clone(),
        );

        Self {
            registry,
            http_request_duration,
            records_created,
            estimates_served,
            notification_failures,
        }
    }

    pub fn record_created(&self, kind: &str) {
        self.records_created
            .get_or_create(&RecordLabel {
                kind: kind.to_string(),
            })
            .inc();
    }

    /// Render all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> String {
        let mut buf = String::new();
        if let Err(e) = encode(&mut buf, &self.registry) {
            tracing::error!(error = %e, "failed to encode metrics");
        }
        buf
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
