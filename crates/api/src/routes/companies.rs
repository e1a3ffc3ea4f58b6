//! Company management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use bizpulse_core::company::CompanyInput;
use bizpulse_shared::types::CompanyId;
use serde_json::json;
use tracing::info;

use crate::{AppState, error::map_business_error, middleware::AuthUser};

/// Creates the companies router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route("/companies/{company_id}", put(update_company))
}

/// GET /companies - List the user's companies, newest first.
async fn list_companies(State(state): State<AppState>, auth: AuthUser) -> Response {
    match state.service.list_companies(&auth).await {
        Ok(companies) => (StatusCode::OK, Json(json!({ "data": companies }))).into_response(),
        Err(e) => map_business_error(e),
    }
}

/// POST /companies - Create a company.
async fn create_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CompanyInput>,
) -> Response {
    match state.service.create_company(&auth, &payload).await {
        Ok(saved) => {
            info!(
                company_id = %saved.company.id,
                user_id = %auth.user_id(),
                "Company created via API"
            );
            (StatusCode::CREATED, Json(saved)).into_response()
        }
        Err(e) => map_business_error(e),
    }
}

/// PUT `/companies/{company_id}` - Replace a company's name, description and capital.
async fn update_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<CompanyId>,
    Json(payload): Json<CompanyInput>,
) -> Response {
    match state
        .service
        .update_company(&auth, company_id, &payload)
        .await
    {
        Ok(saved) => (StatusCode::OK, Json(saved)).into_response(),
        Err(e) => map_business_error(e),
    }
}
