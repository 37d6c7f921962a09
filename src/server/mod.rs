//! # Server — HTTP API for the Lead-Capture Site
//!
//! Runs an Axum HTTP server that serves the static site build and exposes the
//! JSON API the site's forms and calculator talk to.
//!
//! | Endpoint | Handler module |
//! |----------|----------------|
//! | `POST/GET /api/contacts` | `routes_contacts` |
//! | `POST/GET /api/consultations`, `PATCH /api/consultations/{id}/status` | `routes_consultations` |
//! | `POST/GET /api/cost-estimates` | `routes_cost_estimates` |
//! | `POST /api/estimate` | `routes_estimate` |
//! | `GET /healthz`, `/readyz`, `/metrics` | `routes_health` |
//!
//! The store and the contact notifier are injected through [`AppState`], so
//! tests build a fresh router around a fresh [`MemoryStore`] each time.

mod error;
mod routes_consultations;
mod routes_contacts;
mod routes_cost_estimates;
mod routes_estimate;
mod routes_health;

pub use error::ApiError;

use crate::notify::{NoopNotifier, Notifier, WebhookNotifier};
use crate::prom_metrics;
use crate::store::{MemoryStore, RecordStore};
use anyhow::{Context, Result};
use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::Router;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Instrument};

pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub notifier: Arc<dyn Notifier>,
    pub prom_metrics: prom_metrics::Metrics,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
        prom_metrics: prom_metrics::Metrics,
    ) -> Arc<Self> {
        Arc::new(AppState {
            store,
            notifier,
            prom_metrics,
        })
    }

    /// Empty in-memory store, no contact forwarding.
    pub fn in_memory() -> Arc<Self> {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(NoopNotifier),
            prom_metrics::Metrics::new(),
        )
    }
}

/// Settings for `serve`, gathered from flags and environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
    pub contact_webhook_url: Option<url::Url>,
    pub webhook_timeout: Duration,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Fail early on settings that would only surface after the first request.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.static_dir {
            anyhow::ensure!(
                dir.is_dir(),
                "static directory {} does not exist",
                dir.display()
            );
        }
        if let Some(url) = &self.contact_webhook_url {
            anyhow::ensure!(
                matches!(url.scheme(), "http" | "https"),
                "contact webhook URL must be http or https: {url}"
            );
        }
        anyhow::ensure!(
            !self.webhook_timeout.is_zero(),
            "webhook timeout must be greater than zero"
        );
        Ok(())
    }
}

/// Records request duration into the Prometheus histogram, generates (or
/// propagates) a request ID for correlation, and wraps the request in a
/// tracing span.
async fn metrics_middleware(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> axum::response::Response {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let method = req.method().to_string();
    let raw_path = req.uri().path().to_string();
    let norm_path = normalize_path(&raw_path);
    let start = std::time::Instant::now();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %raw_path,
    );
    let mut response = next.run(req).instrument(span).await;

    state
        .prom_metrics
        .http_request_duration
        .get_or_create(&prom_metrics::HttpLabel {
            method,
            path: norm_path,
        })
        .observe(start.elapsed().as_secs_f64());

    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

/// Histogram label for a request path. Ids under `/api` collapse to
/// placeholders; anything outside the API and health routes is served from
/// the static fallback and shares one label.
fn normalize_path(path: &str) -> String {
    match path {
        "" | "/" | "/healthz" | "/readyz" | "/metrics" => return path.to_string(),
        _ if path == "/api" || path.starts_with("/api/") => {}
        _ => return "/static".to_string(),
    }
    path.split('/')
        .map(|seg| {
            let is_uuid = seg.len() == 36 && seg.matches('-').count() == 4;
            let is_number = !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_digit());
            if is_uuid {
                ":uuid"
            } else if is_number {
                ":id"
            } else {
                seg
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

async fn handler_index() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "renovate-leads API\n\n\
         POST/GET  /api/contacts\n\
         POST/GET  /api/consultations\n\
         PATCH     /api/consultations/{id}/status\n\
         POST/GET  /api/cost-estimates\n\
         POST      /api/estimate\n",
    )
}

pub fn build_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route(
            "/api/contacts",
            get(routes_contacts::handler_contacts_list)
                .post(routes_contacts::handler_contacts_create),
        )
        .route(
            "/api/consultations",
            get(routes_consultations::handler_consultations_list)
                .post(routes_consultations::handler_consultations_create),
        )
        .route(
            "/api/consultations/{id}/status",
            patch(routes_consultations::handler_consultation_status),
        )
        .route(
            "/api/cost-estimates",
            get(routes_cost_estimates::handler_cost_estimates_list)
                .post(routes_cost_estimates::handler_cost_estimates_create),
        )
        .route("/api/estimate", post(routes_estimate::handler_estimate))
        .route("/healthz", get(routes_health::handler_healthz))
        .route("/readyz", get(routes_health::handler_readyz))
        .route("/metrics", get(routes_health::handler_metrics));

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));
    } else {
        app = app.route("/", get(handler_index));
    }

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(CatchPanicLayer::new())
    .layer(axum::middleware::from_fn_with_state(
        state.clone(),
        metrics_middleware,
    ))
    .layer(TraceLayer::new_for_http())
    .layer(RequestBodyLimitLayer::new(1024 * 1024))
    .layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(30),
    ))
    .with_state(state)
}

pub async fn run(config: ServerConfig) -> Result<()> {
    config.validate()?;

    let metrics = prom_metrics::Metrics::new();
    let notifier: Arc<dyn Notifier> = match &config.contact_webhook_url {
        Some(url) => {
            let webhook = WebhookNotifier::new(
                url.clone(),
                config.webhook_timeout,
                metrics.notification_failures.clone(),
            )?;
            info!(url = %webhook.url(), "forwarding new contacts to webhook");
            Arc::new(webhook)
        }
        None => Arc::new(NoopNotifier),
    };
    let state = AppState::new(Arc::new(MemoryStore::new()), notifier, metrics);
    let app = build_router(state, config.static_dir.as_deref());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "server running");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("received SIGINT, shutting down"),
                    _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                ctrl_c.await.ok();
                info!("received SIGINT, shutting down");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("received SIGINT, shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServerConfig {
        ServerConfig {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
            static_dir: None,
            contact_webhook_url: None,
            webhook_timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn normalize_path_preserves_api_routes() {
        assert_eq!(normalize_path("/api/contacts"), "/api/contacts");
        assert_eq!(normalize_path("/api/cost-estimates"), "/api/cost-estimates");
        assert_eq!(normalize_path("/metrics"), "/metrics");
    }

    #[test]
    fn normalize_path_collapses_uuids() {
        assert_eq!(
            normalize_path("/api/consultations/550e8400-e29b-41d4-a716-446655440000/status"),
            "/api/consultations/:uuid/status"
        );
    }

    #[test]
    fn normalize_path_collapses_numeric_ids() {
        assert_eq!(normalize_path("/api/consultations/42/status"), "/api/consultations/:id/status");
    }

    #[test]
    fn normalize_path_folds_static_paths() {
        assert_eq!(normalize_path("/index.html"), "/static");
        assert_eq!(normalize_path("/assets/app-3f9c.js"), "/static");
        assert_eq!(normalize_path("/apiary"), "/static");
        assert_eq!(normalize_path("/healthz"), "/healthz");
    }

    #[test]
    fn normalize_path_handles_empty_and_root() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn config_default_is_valid() {
        assert!(config().validate().is_ok());
        assert_eq!(config().addr().to_string(), "127.0.0.1:5000");
    }

    #[test]
    fn config_rejects_missing_static_dir() {
        let cfg = ServerConfig {
            static_dir: Some(PathBuf::from("/definitely/not/here")),
            ..config()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn config_rejects_non_http_webhook() {
        let cfg = ServerConfig {
            contact_webhook_url: Some(url::Url::parse("mailto:owner@example.com").unwrap()),
            ..config()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn config_rejects_zero_timeout() {
        let cfg = ServerConfig {
            webhook_timeout: Duration::ZERO,
            ..config()
        };
        assert!(cfg.validate().is_err());
    }
}
