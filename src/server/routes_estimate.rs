//! `POST /api/estimate` — Compute a price breakdown without saving it.
//!
//! Body: `{"projectType": "flooring", "squareFootage": 200, "qualityLevel": "1.0"}`.
//! Returns `{"totalEstimate", "materials", "labor", "permits"}`. An unknown
//! project type is a 400, never a zero-cost estimate.

use super::error::{json_body, ApiError};
use super::AppState;
use crate::estimate::Estimate;
use crate::validation;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

pub(super) async fn handler_estimate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Estimate>, ApiError> {
    let body = json_body("estimate", body)?;
    let estimate =
        validation::estimate_request(&body).map_err(|e| ApiError::validation("estimate", e))?;
    state.prom_metrics.estimates_served.inc();
    Ok(Json(estimate))
}
