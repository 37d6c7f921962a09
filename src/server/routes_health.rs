//! # Health & Observability Endpoints
//!
//! | Endpoint | Purpose | K8s Probe |
//! |----------|---------|-----------|
//! | `GET /healthz` | Liveness — process is alive | `livenessProbe` |
//! | `GET /readyz` | Readiness — store answers its health check | `readinessProbe` |
//! | `GET /metrics` | Prometheus scraping endpoint | `ServiceMonitor` |

use super::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;
use std::time::Duration;

/// Liveness probe: returns 200 if the process is serving HTTP.
pub async fn handler_healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Readiness probe: runs the store health check with a 2-second timeout.
///
/// The in-memory store always passes; a durable backend that cannot be
/// reached turns this into a 503.
pub async fn handler_readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = Arc::clone(&state.store);
    let check = tokio::time::timeout(
        Duration::from_secs(2),
        tokio::task::spawn_blocking(move || store.health_check()),
    )
    .await;

    match check {
        Ok(Ok(Ok(()))) => (StatusCode::OK, "ok"),
        Ok(Ok(Err(_))) | Ok(Err(_)) => (StatusCode::SERVICE_UNAVAILABLE, "store unavailable"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "store timeout"),
    }
}

/// Prometheus metrics in OpenMetrics text format.
pub async fn handler_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = state.prom_metrics.encode();
    (
        StatusCode::OK,
        [(
            "content-type",
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        body,
    )
}
