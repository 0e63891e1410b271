//! Unified HTTP error mapping.
//!
//! Every handler returns `Result<T, ApiError>`; the conversion to a JSON
//! `{"error": ...}` body keeps the taxonomy flat on the wire: invalid input
//! is the caller's fault (400), everything else is a server-side extraction
//! failure (500).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::error::ExtractError;

pub struct ApiError(pub ExtractError);

impl From<ExtractError> for ApiError {
    fn from(e: ExtractError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ExtractError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "extraction request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
