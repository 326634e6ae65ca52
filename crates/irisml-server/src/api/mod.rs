//! HTTP request pipeline: error mapping, request tracking, prediction.

pub mod predict;
pub mod track;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use irisml_core::ServeError;

/// Response wrapper carrying a `ServeError` to the client as
/// `{"error": <stable code>, "detail": ...}` with the mapped status.
pub struct ApiError(pub ServeError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = StatusCode::from_u16(code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match &self.0 {
            ServeError::Validation(violations) => json!({
                "error": code.as_str(),
                "detail": violations,
            }),
            other => json!({
                "error": code.as_str(),
                "detail": other.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServeError> for ApiError {
    fn from(err: ServeError) -> Self {
        ApiError(err)
    }
}
