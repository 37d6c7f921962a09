//! # Contact Form API
//!
//! | Endpoint | Purpose |
//! |----------|---------|
//! | `POST /api/contacts` | Store a contact-form submission |
//! | `GET /api/contacts` | List submissions, newest first |
//!
//! A stored contact is handed to the configured notifier after the store call
//! returns. Notifier failures never change the response.

use super::error::{json_body, ApiError};
use super::AppState;
use crate::store::Contact;
use crate::validation;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::info;

/// `POST /api/contacts` — Validate and store a contact.
pub(super) async fn handler_contacts_create(
    State(state): State<Arc<AppState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let body = json_body("contact", body)?;
    let input =
        validation::contact_input(&body).map_err(|e| ApiError::validation("contact", e))?;

    let contact = state.store.create_contact(&input)?;
    state.prom_metrics.record_created("contact");
    info!(contact_id = %contact.id, "contact stored");

    state.notifier.notify(&contact);
    Ok(Json(contact))
}

/// `GET /api/contacts` — All contacts, newest first.
pub(super) async fn handler_contacts_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.store.list_contacts()?))
}
