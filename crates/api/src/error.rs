//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bizpulse_core::BusinessError;
use bizpulse_shared::AppError;
use serde_json::json;
use tracing::{error, warn};

/// Renders an application error as `{ "error": code, "message": text }`.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.user_message()
        })),
    )
        .into_response()
}

/// Logs a business error and renders it.
pub fn map_business_error(err: BusinessError) -> Response {
    if err.is_validation() {
        warn!(error = %err, "Rejected request");
    } else {
        error!(error = %err, "Request failed");
    }
    error_response(&AppError::from(err))
}
