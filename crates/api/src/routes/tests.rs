//! Router tests over the in-memory record store.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::AUTHORIZATION},
};
use bizpulse_core::{BusinessDataService, InMemoryStore, RecordStore};
use bizpulse_shared::{JwtConfig, JwtService, NetIncomeFormula};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use crate::{AppState, create_router};

fn create_test_state() -> AppState {
    let store: Arc<dyn RecordStore> = Arc::new(InMemoryStore::new());
    AppState {
        service: Arc::new(BusinessDataService::new(
            store,
            NetIncomeFormula::RevenueLessTotalCosts,
        )),
        jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
    }
}

/// Helper to create a valid auth token for a user.
fn create_auth_token(state: &AppState, user_id: Uuid) -> String {
    state
        .jwt_service
        .generate_access_token(user_id, Some("owner@example.com".to_string()))
        .expect("should generate token")
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        request = request.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create_company(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/companies",
        Some(token),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["company"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = create_router(create_test_state());

    let (status, body) = send(&app, "GET", "/api/v1/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = create_router(create_test_state());

    let (status, body) = send(&app, "GET", "/api/v1/companies", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_token_with_wrong_secret_is_unauthorized() {
    let state = create_test_state();
    let app = create_router(state);
    let forged = JwtService::new(JwtConfig {
        secret: "someone-else".to_string(),
        ..JwtConfig::default()
    })
    .generate_access_token(Uuid::new_v4(), None)
    .unwrap();

    let (status, _) = send(&app, "GET", "/api/v1/companies", Some(&forged), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_list_companies() {
    let state = create_test_state();
    let token = create_auth_token(&state, Uuid::new_v4());
    let app = create_router(state);

    let id = create_company(&app, &token, "  Acme Srl ").await;
    let (status, body) = send(&app, "GET", "/api/v1/companies", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], id.as_str());
    assert_eq!(body["data"][0]["name"], "Acme Srl");
}

#[tokio::test]
async fn test_blank_company_name_is_rejected() {
    let state = create_test_state();
    let token = create_auth_token(&state, Uuid::new_v4());
    let app = create_router(state);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/companies",
        Some(&token),
        Some(json!({ "name": "   ", "description": "desc" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_submit_monthly_data_returns_reloaded_list() {
    let state = create_test_state();
    let token = create_auth_token(&state, Uuid::new_v4());
    let app = create_router(state);
    let company_id = create_company(&app, &token, "Acme Srl").await;
    let uri = format!("/api/v1/companies/{company_id}/monthly-data");

    for (month, revenue) in [(2, json!(52000)), (1, json!("45000"))] {
        let (status, _) = send(
            &app,
            "POST",
            &uri,
            Some(&token),
            Some(json!({
                "month": month,
                "year": 2024,
                "revenue": revenue,
                "direct_costs": 18000,
                "total_costs": 30000,
                "owner_compensation": ""
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["month"], 1);
    assert_eq!(records[0]["margin"], "27000");
    assert_eq!(records[0]["net_income"], "15000");
}

#[tokio::test]
async fn test_negative_margin_returns_advisory() {
    let state = create_test_state();
    let token = create_auth_token(&state, Uuid::new_v4());
    let app = create_router(state);
    let company_id = create_company(&app, &token, "Acme Srl").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/companies/{company_id}/monthly-data"),
        Some(&token),
        Some(json!({ "month": 3, "year": 2024, "revenue": 1000, "direct_costs": 2000 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["advisories"][0]["advisory"]["kind"], "negative_margin");
    assert_eq!(
        body["advisories"][0]["message"],
        "Il margine è negativo. Verifica i dati inseriti."
    );
    assert_eq!(body["records"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_foreign_company_is_not_found() {
    let state = create_test_state();
    let owner = create_auth_token(&state, Uuid::new_v4());
    let intruder = create_auth_token(&state, Uuid::new_v4());
    let app = create_router(state);
    let company_id = create_company(&app, &owner, "Acme Srl").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/companies/{company_id}/dashboard"),
        Some(&intruder),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_unknown_record_is_not_found() {
    let state = create_test_state();
    let token = create_auth_token(&state, Uuid::new_v4());
    let app = create_router(state);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/v1/monthly-data/{}", Uuid::new_v4()),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_targets_and_alerts() {
    let state = create_test_state();
    let token = create_auth_token(&state, Uuid::new_v4());
    let app = create_router(state);
    let company_id = create_company(&app, &token, "Acme Srl").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/companies/{company_id}/targets"),
        Some(&token),
        Some(json!({ "year": 2024, "target_margin": 30000, "target_net_income": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["target"]["target_net_income"], Value::Null);

    send(
        &app,
        "POST",
        &format!("/api/v1/companies/{company_id}/monthly-data"),
        Some(&token),
        Some(json!({ "month": 6, "year": 2024, "revenue": 43000, "direct_costs": 18000 })),
    )
    .await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/companies/{company_id}/alerts"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["kind"], "margin_below_target");
    assert_eq!(body["data"][0]["message"], "Margine sotto target del mese");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/companies/{company_id}/dashboard"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["latest_label"], "Giugno 2024");
    assert_eq!(body["cards"][1]["under_target"], true);
    assert_eq!(body["cards"][3]["label"], "Margine %");
    assert_eq!(body["cards"][3]["display"], "58.1%");
    assert_eq!(body["cards"][3]["under_target"], true);
    assert_eq!(body["totals"]["months_recorded"], 1);
    assert_eq!(body["totals"]["revenue_display"], "43.000\u{a0}€");
}
