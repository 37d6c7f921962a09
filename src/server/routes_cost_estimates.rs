//! # Saved Estimate API
//!
//! | Endpoint | Purpose |
//! |----------|---------|
//! | `POST /api/cost-estimates` | Save a calculator result |
//! | `GET /api/cost-estimates` | List saved results, newest first |
//!
//! Amounts are stored as submitted; they are not recomputed here.

use super::error::{json_body, ApiError};
use super::AppState;
use crate::store::CostEstimate;
use crate::validation;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::info;

/// `POST /api/cost-estimates` — Validate and store a calculator result.
pub(super) async fn handler_cost_estimates_create(
    State(state): State<Arc<AppState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<CostEstimate>, ApiError> {
    let body = json_body("cost estimate", body)?;
    let input = validation::cost_estimate_input(&body)
        .map_err(|e| ApiError::validation("cost estimate", e))?;

    let estimate = state.store.create_cost_estimate(&input)?;
    state.prom_metrics.record_created("cost_estimate");
    info!(
        estimate_id = %estimate.id,
        project_type = %estimate.project_type,
        estimated_cost = estimate.estimated_cost,
        "cost estimate saved"
    );
    Ok(Json(estimate))
}

/// `GET /api/cost-estimates` — All saved results, newest first.
pub(super) async fn handler_cost_estimates_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CostEstimate>>, ApiError> {
    Ok(Json(state.store.list_cost_estimates()?))
}
