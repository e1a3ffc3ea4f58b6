//! Monthly figures routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use bizpulse_core::metrics::Advisory;
use bizpulse_core::records::{MonthlyEntryInput, MonthlyRecordPatch};
use bizpulse_shared::types::{CompanyId, MonthlyRecordId};
use serde_json::json;

use crate::{AppState, error::map_business_error, middleware::AuthUser};

/// Creates the monthly data router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies/{company_id}/monthly-data",
            get(list_records).post(submit_record),
        )
        .route(
            "/monthly-data/{record_id}",
            patch(update_record).delete(delete_record),
        )
}

/// Advisories with their display message.
fn advisory_responses(advisories: &[Advisory]) -> Vec<serde_json::Value> {
    advisories
        .iter()
        .map(|a| json!({ "advisory": a, "message": a.message() }))
        .collect()
}

/// GET `/companies/{company_id}/monthly-data` - Records ordered by year, then month.
async fn list_records(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<CompanyId>,
) -> Response {
    match state.service.list_monthly_records(&auth, company_id).await {
        Ok(records) => (StatusCode::OK, Json(json!({ "data": records }))).into_response(),
        Err(e) => map_business_error(e),
    }
}

/// POST `/companies/{company_id}/monthly-data` - Store a month, replacing the same period.
async fn submit_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<CompanyId>,
    Json(payload): Json<MonthlyEntryInput>,
) -> Response {
    match state
        .service
        .submit_monthly_record(&auth, Some(company_id), &payload)
        .await
    {
        Ok(saved) => (
            StatusCode::OK,
            Json(json!({
                "record": saved.record,
                "records": saved.records,
                "advisories": advisory_responses(&saved.advisories),
            })),
        )
            .into_response(),
        Err(e) => map_business_error(e),
    }
}

/// PATCH `/monthly-data/{record_id}` - Edit figures and recompute metrics.
async fn update_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(record_id): Path<MonthlyRecordId>,
    Json(payload): Json<MonthlyRecordPatch>,
) -> Response {
    match state
        .service
        .update_monthly_record(&auth, record_id, &payload)
        .await
    {
        Ok(saved) => (
            StatusCode::OK,
            Json(json!({
                "record": saved.record,
                "records": saved.records,
                "advisories": advisory_responses(&saved.advisories),
            })),
        )
            .into_response(),
        Err(e) => map_business_error(e),
    }
}

/// DELETE `/monthly-data/{record_id}` - Delete a record.
async fn delete_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(record_id): Path<MonthlyRecordId>,
) -> Response {
    match state.service.delete_monthly_record(&auth, record_id).await {
        Ok(records) => (StatusCode::OK, Json(json!({ "data": records }))).into_response(),
        Err(e) => map_business_error(e),
    }
}
