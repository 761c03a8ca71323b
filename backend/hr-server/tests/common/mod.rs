#![allow(dead_code)]

//! Test infrastructure for hr-server HTTP tests

use hr_config::Config;
use hr_server::{build_app_state, build_ingest_router};
use hr_ws::AppState;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

pub const ACME_TOKEN: &str = "token1";
pub const BETA_TOKEN: &str = "token2";

/// In-memory SQLite; one connection so every query sees the same database
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(SqliteConnectOptions::new().filename(":memory:"))
        .await
        .expect("Failed to create test database");

    hr_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// AppState for tenants `acme` (token1) and `beta` (token2)
pub async fn create_test_app_state() -> AppState {
    let mut config = Config::default();
    config
        .auth
        .tokens
        .insert(ACME_TOKEN.to_string(), "acme".to_string());
    config
        .auth
        .tokens
        .insert(BETA_TOKEN.to_string(), "beta".to_string());

    build_app_state(&config, create_test_pool().await).expect("Failed to build app state")
}

/// Ingest router with the default body limit
pub fn ingest_router(state: AppState) -> Router {
    build_ingest_router(state, Config::default().server.max_body_bytes)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// POST `body` to `path` on `tenant`'s subdomain
pub fn capture_request(tenant: &str, path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("host", format!("{tenant}.hooks.test:8000"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authorized(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}
