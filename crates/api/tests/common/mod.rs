//! Shared helpers for HTTP-level integration tests.
//!
//! Requests are sent straight to the router with `tower::ServiceExt::oneshot`,
//! so every test runs the same middleware stack as the server binary.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use calendar_api::config::{AppMode, ServerConfig};
use calendar_api::router::build_app_router;
use calendar_api::state::AppState;

/// Build a test `ServerConfig` with the default `/api` prefix.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        api_prefix: "/api".to_string(),
        cors_origins: vec!["http://localhost:5173".parse().unwrap()],
        request_timeout_secs: 30,
        mode: AppMode::Debug,
    }
}

/// Build the full application router over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    build_app_router(AppState::new(pool, config))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<String>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json)
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body.to_string())).await
}

/// Send a raw (possibly malformed) JSON body.
pub async fn send_raw_json(app: Router, method: Method, uri: &str, body: &str) -> Response<Body> {
    send(app, method, uri, Some(body.to_string())).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create an event through the API and return its id.
pub async fn create_event(app: &Router, title: &str, date: &str, start: &str, end: &str) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/events",
        serde_json::json!({
            "title": title,
            "event_date": date,
            "start_time": start,
            "end_time": end,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
