//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_bytes, build_test_app, build_test_app_with, get, test_config};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /healthcheck returns plain-text ok
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn healthcheck_returns_ok_text(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/healthcheck").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"ok");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn healthcheck_is_not_under_api_prefix(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/healthcheck").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: unknown route returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/healthcheck").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(
        request_id.to_str().unwrap().len(),
        36,
        "x-request-id should be a UUID string"
    );
}

// ---------------------------------------------------------------------------
// Test: CORS preflight
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_allows_configured_origin(pool: PgPool) {
    let app = build_test_app(pool);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/events")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "PUT")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:5173"
    );
}

// ---------------------------------------------------------------------------
// Test: API prefix is configurable
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_prefix_mounts_events_at_root(pool: PgPool) {
    let config = calendar_api::config::ServerConfig {
        api_prefix: String::new(),
        ..test_config()
    };
    let app = build_test_app_with(pool, config);

    let response = get(app.clone(), "/events").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/events").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn custom_prefix_is_honoured(pool: PgPool) {
    let config = calendar_api::config::ServerConfig {
        api_prefix: "/v2/calendar".to_string(),
        ..test_config()
    };
    let app = build_test_app_with(pool, config);

    let response = get(app, "/v2/calendar/events").await;
    assert_eq!(response.status(), StatusCode::OK);
}
