//! # Consultation Booking API
//!
//! | Endpoint | Purpose |
//! |----------|---------|
//! | `POST /api/consultations` | Book a consultation (status `pending`) |
//! | `GET /api/consultations` | List bookings, newest first |
//! | `PATCH /api/consultations/{id}/status` | Replace a booking's status |

use super::error::{json_body, ApiError};
use super::AppState;
use crate::store::Consultation;
use crate::validation;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use tracing::info;

/// `POST /api/consultations` — Validate and store a booking request.
pub(super) async fn handler_consultations_create(
    State(state): State<Arc<AppState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Consultation>, ApiError> {
    let body = json_body("consultation", body)?;
    let input = validation::consultation_input(&body)
        .map_err(|e| ApiError::validation("consultation", e))?;

    let consultation = state.store.create_consultation(&input)?;
    state.prom_metrics.record_created("consultation");
    info!(consultation_id = %consultation.id, "consultation booked");
    Ok(Json(consultation))
}

/// `GET /api/consultations` — All bookings, newest first.
pub(super) async fn handler_consultations_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Consultation>>, ApiError> {
    Ok(Json(state.store.list_consultations()?))
}

/// `PATCH /api/consultations/{id}/status` — Set the status of one booking.
///
/// Body: `{"status": "confirmed"}`. Unknown ids yield 404.
pub(super) async fn handler_consultation_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Consultation>, ApiError> {
    let body = json_body("status", body)?;
    let status =
        validation::status_update(&body).map_err(|e| ApiError::validation("status", e))?;

    match state.store.update_consultation_status(&id, &status)? {
        Some(consultation) => {
            info!(consultation_id = %id, status = %status, "consultation status updated");
            Ok(Json(consultation))
        }
        None => Err(ApiError::NotFound("Consultation")),
    }
}
