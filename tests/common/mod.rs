use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

use orgmanage::auth::token::TokenIssuer;
use orgmanage::server::{AppState, api_router};

pub const TEST_SECRET: &str = "test-signing-secret";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub db_path: PathBuf,
}

/// Fresh router over a per-test temp SQLite file.
pub async fn spawn_app(tag: &str) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut db_path = std::env::temp_dir();
    db_path.push(format!(
        "orgmanage-{}-{}-{}.sqlite",
        tag,
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", db_path.display());
    let pool = orgmanage::db::connect(&database_url)
        .await
        .expect("failed to open test database");
    orgmanage::db::init_schema(&pool)
        .await
        .expect("failed to initialize schema");

    let state = AppState::new(pool, TokenIssuer::new(TEST_SECRET));
    let app = api_router(state.clone());
    TestApp {
        app,
        state,
        db_path,
    }
}

/// Fire one request at the router and decode the JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let resp = app.clone().oneshot(request).await.expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not json")
    };
    (status, value)
}

pub fn cleanup(app: TestApp) {
    let _ = std::fs::remove_file(&app.db_path);
}
