#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use commands_api::{
    application::command_service::CommandService,
    build_router,
    infrastructure::{database, sqlite_command_repository::SqliteCommandRepository},
    state::AppState,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

/// A fresh file-backed store. The directory lives as long as this value.
pub struct TestStore {
    pub pool: SqlitePool,
    _dir: TempDir,
}

pub async fn open_store() -> TestStore {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = format!("sqlite:{}", dir.path().join("commands.db").display());

    let pool = database::connect(&url, 4).await.expect("pool should open");
    database::init_schema(&pool)
        .await
        .expect("schema should apply");

    TestStore { pool, _dir: dir }
}

pub async fn test_app() -> (Router, TestStore) {
    let store = open_store().await;
    let repository = Arc::new(SqliteCommandRepository::new(store.pool.clone()));
    let service = Arc::new(CommandService::new(repository));
    (build_router(AppState::new(service)), store)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub raw_len: usize,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should serve request");

    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();

    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };

    TestResponse {
        status,
        headers,
        body: value,
        raw_len: body.len(),
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("valid get request"),
    )
    .await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .expect("valid delete request"),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, payload: Value) -> TestResponse {
    with_json(app, "POST", uri, payload).await
}

pub async fn put_json(app: &Router, uri: &str, payload: Value) -> TestResponse {
    with_json(app, "PUT", uri, payload).await
}

async fn with_json(app: &Router, method: &str, uri: &str, payload: Value) -> TestResponse {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("valid json request"),
    )
    .await
}
