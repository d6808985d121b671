// Integration tests for InnerConnect HTTP routes

use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use chrono::{Duration, Utc};
use innerconnect::auth::{StaticKeyProvider, TokenService};
use innerconnect::config::RealtimeSettings;
use innerconnect::core::Matcher;
use innerconnect::models::Role;
use innerconnect::realtime::MatchRoomRegistry;
use innerconnect::services::StaticAdminStats;
use innerconnect::{configure_app, AppState};
use serde_json::{json, Value};
use std::sync::Arc;

fn test_state(demo_login: bool) -> AppState {
    AppState {
        tokens: Arc::new(TokenService::new(
            Arc::new(StaticKeyProvider::from_secret(b"integration-secret", None)),
            "innerconnect-api",
            std::time::Duration::from_secs(900),
        )),
        rooms: Arc::new(MatchRoomRegistry::new()),
        matcher: Matcher::with_default_weights(),
        admin_stats: Arc::new(StaticAdminStats::default()),
        company_domain: "company.com".to_string(),
        demo_login,
        realtime: RealtimeSettings::default(),
        json_limit_bytes: 2 * 1024 * 1024,
    }
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

#[actix_web::test]
async fn test_login_defaults_to_demo_employee() {
    let state = test_state(true);
    let tokens = Arc::clone(&state.tokens);
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["expiresIn"], 900);

    let principal = tokens.verify(body["accessToken"].as_str().unwrap()).unwrap();
    assert_eq!(principal.subject, "demo-user-id");
    assert_eq!(principal.role, Role::Employee);
}

#[actix_web::test]
async fn test_login_with_explicit_identity() {
    let state = test_state(true);
    let tokens = Arc::clone(&state.tokens);
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"userId": "u-7", "role": "moderator"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let principal = tokens.verify(body["accessToken"].as_str().unwrap()).unwrap();
    assert_eq!(principal.subject, "u-7");
    assert_eq!(principal.role, Role::Moderator);
}

#[actix_web::test]
async fn test_login_rejects_empty_user_id() {
    let app = test::init_service(App::new().configure(configure_app(test_state(true)))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"userId": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_login_disabled() {
    let app = test::init_service(App::new().configure(configure_app(test_state(false)))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_signup_domain_check() {
    let app = test::init_service(App::new().configure(configure_app(test_state(true)))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({"email": "bob@other.com", "password": "hunter22"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "domain_mismatch");
    assert_eq!(body["message"], "Only company email allowed");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({"email": "bob@company.com", "password": "hunter22"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "bob@company.com");
}

#[actix_web::test]
async fn test_signup_rejects_non_email() {
    let app = test::init_service(App::new().configure(configure_app(test_state(true)))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({"email": "company.com", "password": "x"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_score_requires_token() {
    let app = test::init_service(App::new().configure(configure_app(test_state(true)))).await;
    let payload = json!({
        "me": {"interests": ["chess"], "department": "ops"},
        "candidate": {"interests": ["chess"], "department": "ops"}
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/matching/score")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Missing token");

    let req = test::TestRequest::post()
        .uri("/api/v1/matching/score")
        .insert_header(bearer("garbage"))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid token");
}

#[actix_web::test]
async fn test_score_with_valid_token() {
    let state = test_state(true);
    let token = state.tokens.issue("alice", Role::Employee).unwrap();
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matching/score")
        .insert_header(bearer(&token))
        .set_json(json!({
            "me": {"interests": ["chess", "golf"], "department": "ops"},
            "candidate": {"interests": ["golf", "chess"], "department": "ops"}
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["score"], 100);
    assert_eq!(body["matched"], true);

    let req = test::TestRequest::post()
        .uri("/api/v1/matching/score")
        .insert_header(bearer(&token))
        .set_json(json!({
            "me": {"interests": [], "department": "ops"},
            "candidate": {"interests": [], "department": "sales"}
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["score"], 5);
    assert_eq!(body["matched"], false);
}

#[actix_web::test]
async fn test_score_rejects_expired_token() {
    let state = test_state(true);
    let token = state
        .tokens
        .issue_at("alice", Role::Admin, Utc::now() - Duration::minutes(30))
        .unwrap();
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matching/score")
        .insert_header(bearer(&token))
        .set_json(json!({"me": {}, "candidate": {}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_dashboard_role_gate() {
    let state = test_state(true);
    let employee = state.tokens.issue("e1", Role::Employee).unwrap();
    let moderator = state.tokens.issue("m1", Role::Moderator).unwrap();
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get().uri("/api/v1/admin/dashboard").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/dashboard")
        .insert_header(bearer(&employee))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/dashboard")
        .insert_header(bearer(&moderator))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["totalUsers"], 124);
    assert_eq!(body["activeConnections"], 0);
}

#[actix_web::test]
async fn test_websocket_upgrade_requires_token() {
    let app = test::init_service(App::new().configure(configure_app(test_state(true)))).await;

    let req = test::TestRequest::get().uri("/ws").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_health_and_malformed_json() {
    let app = test::init_service(App::new().configure(configure_app(test_state(true)))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "innerconnect-api");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}
