//! Shared helpers for API integration tests.
//!
//! `build_test_app` mirrors the router construction in `main.rs` so these
//! tests exercise the same middleware stack (CORS, request ID, timeout,
//! tracing, panic recovery) that production uses.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use encore_api::config::ServerConfig;
use encore_api::router::build_app_router;
use encore_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_ttl_hours: 12,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request, optionally with a patron session token.
pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("x-session-token", token);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a POST with a JSON body, optionally with a patron session token.
pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    send_json(app, "POST", uri, token, body).await
}

/// Send a PUT with a JSON body.
pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, "PUT", uri, None, body).await
}

async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("x-session-token", token);
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is not valid JSON")
}

// ---------------------------------------------------------------------------
// Seeding through the API
// ---------------------------------------------------------------------------

/// Create a venue through the API; returns its id.
pub async fn seed_venue(app: &Router, max_per_patron: i64, queue_limit: i64) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/venues",
        None,
        json!({
            "name": "The Velvet Room",
            "slug": format!("velvet-{}", uuid::Uuid::new_v4()),
            "max_requests_per_patron": max_per_patron,
            "queue_limit": queue_limit,
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Add a track to a venue through the API; returns its id.
pub async fn seed_track(app: &Router, venue_id: i64, title: &str) -> i64 {
    let response = post_json(
        app.clone(),
        &format!("/api/v1/venues/{venue_id}/tracks"),
        None,
        json!({ "title": title, "artist": "Test Artist", "duration_secs": 200 }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Open a patron session through the API; returns its token.
pub async fn seed_session(app: &Router, venue_id: i64, table_tag: &str) -> String {
    let response = post_json(
        app.clone(),
        &format!("/api/v1/venues/{venue_id}/sessions"),
        None,
        json!({ "table_tag": table_tag }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["session_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Submit a request as the given patron; returns the raw response.
pub async fn submit(app: &Router, venue_id: i64, token: &str, track_id: i64) -> Response<Body> {
    post_json(
        app.clone(),
        &format!("/api/v1/venues/{venue_id}/requests"),
        Some(token),
        json!({ "track_id": track_id }),
    )
    .await
}

/// Transition a request via the staff endpoint; returns the raw response.
pub async fn transition(app: &Router, request_id: i64, target: &str) -> Response<Body> {
    post_json(
        app.clone(),
        &format!("/api/v1/requests/{request_id}/transition"),
        None,
        json!({ "target": target }),
    )
    .await
}
