//! Mapping of core errors onto HTTP responses.
//!
//! The dashboard frontend only checks for one failure status, so every error
//! kind shares it; the body names the kind for debugging.

use super::models::ErrorBody;
use crate::utils::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::debug;

/// Status used for every failed call
pub const FAILURE_STATUS: StatusCode = StatusCode::FORBIDDEN;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!("Request failed: {} ({})", self, self.kind());

        let body = ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (FAILURE_STATUS, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}
