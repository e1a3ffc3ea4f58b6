//! Dashboard and alert routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use bizpulse_shared::types::CompanyId;
use serde_json::json;

use crate::{AppState, error::map_business_error, middleware::AuthUser};

/// Creates the dashboard router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies/{company_id}/alerts", get(get_alerts))
        .route("/companies/{company_id}/dashboard", get(get_dashboard))
}

/// GET `/companies/{company_id}/alerts` - Missed targets for the latest period.
async fn get_alerts(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<CompanyId>,
) -> Response {
    match state.service.alerts(&auth, company_id).await {
        Ok(alerts) => {
            let data: Vec<_> = alerts
                .iter()
                .map(|a| {
                    json!({
                        "kind": a.kind,
                        "period": a.period,
                        "actual": a.actual,
                        "target": a.target,
                        "shortfall": a.shortfall,
                        "message": a.message(),
                    })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "data": data }))).into_response()
        }
        Err(e) => map_business_error(e),
    }
}

/// GET `/companies/{company_id}/dashboard` - Metric cards, alerts and trend series.
async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<CompanyId>,
) -> Response {
    match state.service.dashboard(&auth, company_id).await {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
        Err(e) => map_business_error(e),
    }
}
