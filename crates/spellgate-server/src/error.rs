//! Error responses for the HTTP surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use spellgate_core::ValidationError;

use crate::checker::CheckError;

/// Body sent with every rejected request.
pub const BAD_REQUEST_BODY: &str = "400 Bad Request";

/// Body sent when the engine fails mid-request.
pub const INTERNAL_ERROR_BODY: &str = "500 Internal Server Error";

/// Request-level failure that converts into an HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(#[from] ValidationError),

    #[error("check failed: {0}")]
    Check(#[from] CheckError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Check(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::BadRequest(reason) => tracing::debug!(%reason, "rejected request"),
            ApiError::Check(err) => tracing::error!(error = %err, "check failed"),
        }
        let body = match status {
            StatusCode::BAD_REQUEST => BAD_REQUEST_BODY,
            _ => INTERNAL_ERROR_BODY,
        };
        (status, Json(body)).into_response()
    }
}
