//! Error responses shared by the API handlers.
//!
//! | Variant | Status | Body |
//! |---------|--------|------|
//! | `Validation` | 400 | `{"message": "Invalid <kind> data", "errors": [{path, message}]}` |
//! | `NotFound` | 404 | `{"message": "<Kind> not found"}` |
//! | `Internal` | 500 | `{"message": "Internal server error"}` |
//!
//! The cause of an internal error is logged, never sent to the client.

use crate::store::StoreError;
use crate::validation::ValidationErrors;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    Validation {
        kind: &'static str,
        errors: ValidationErrors,
    },
    NotFound(&'static str),
    Internal(String),
}

impl ApiError {
    pub fn validation(kind: &'static str, errors: ValidationErrors) -> Self {
        ApiError::Validation { kind, errors }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { kind, errors } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": format!("Invalid {kind} data"),
                    "errors": errors.issues,
                })),
            )
                .into_response(),
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": format!("{what} not found") })),
            )
                .into_response(),
            ApiError::Internal(cause) => {
                error!(error = %cause, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Unwrap a JSON body, turning a malformed body into a validation error
/// for `kind`.
pub(super) fn json_body(
    kind: &'static str,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError::validation(
            kind,
            ValidationErrors::body(rejection.body_text()),
        )),
    }
}
