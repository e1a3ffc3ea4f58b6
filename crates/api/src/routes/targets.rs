//! Yearly target routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use bizpulse_core::targets::TargetInput;
use bizpulse_shared::types::CompanyId;
use serde_json::json;

use crate::{AppState, error::map_business_error, middleware::AuthUser};

/// Creates the targets router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/companies/{company_id}/targets",
        get(list_targets).put(save_targets),
    )
}

/// GET `/companies/{company_id}/targets` - Targets, latest year first.
async fn list_targets(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<CompanyId>,
) -> Response {
    match state.service.list_targets(&auth, company_id).await {
        Ok(targets) => (StatusCode::OK, Json(json!({ "data": targets }))).into_response(),
        Err(e) => map_business_error(e),
    }
}

/// PUT `/companies/{company_id}/targets` - Set the targets of a year.
async fn save_targets(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<CompanyId>,
    Json(payload): Json<TargetInput>,
) -> Response {
    match state
        .service
        .save_targets(&auth, Some(company_id), &payload)
        .await
    {
        Ok(saved) => (StatusCode::OK, Json(saved)).into_response(),
        Err(e) => map_business_error(e),
    }
}
