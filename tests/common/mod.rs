//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use renovate_leads::notify::Notifier;
use renovate_leads::prom_metrics::Metrics;
use renovate_leads::server::{build_router, AppState};
use renovate_leads::store::{Contact, MemoryStore};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Notifier that remembers every contact it was handed.
#[derive(Default)]
pub struct RecordingNotifier {
    pub seen: Mutex<Vec<Contact>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, contact: &Contact) {
        self.seen.lock().unwrap().push(contact.clone());
    }
}

/// Fresh router over an empty in-memory store.
pub fn build_test_app() -> Router {
    build_router(AppState::in_memory(), None)
}

/// Fresh router plus a handle on the notifier it forwards contacts to.
pub fn build_test_app_with_notifier() -> (Router, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        notifier.clone(),
        Metrics::new(),
    );
    (build_router(state, None), notifier)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value =
        serde_json::from_slice(&bytes).unwrap_or(serde_json::json!(null));
    (status, json)
}

/// GET `uri` and return the status code and parsed JSON body
/// (`null` if the body is not JSON).
pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

/// Send `body` as JSON with the given method.
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(
        app,
        Request::builder()
            .uri(uri)
            .method(method)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "POST", uri, body).await
}

/// POST a raw (possibly malformed) body with a JSON content type.
pub async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        Request::builder()
            .uri(uri)
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}
