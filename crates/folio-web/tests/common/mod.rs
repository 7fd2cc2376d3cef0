#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use folio_web::{
    app_state::AppState,
    config,
    router::build_router,
    store::{MemoryStore, Seed},
};

pub const ADMIN: &str = "t-admin";
pub const EDITOR_1: &str = "t-ed1";
pub const EDITOR_2: &str = "t-ed2";
pub const CUSTOMER: &str = "t-cust";

const CONFIG: &str = r#"
version: 1
blog:
  revalidate_secs: 3600
auth:
  tokens:
    - { token: "t-admin", user_id: "u-admin" }
    - { token: "t-ed1", user_id: "u-ed1" }
    - { token: "t-ed2", user_id: "u-ed2" }
    - { token: "t-cust", user_id: "u-cust" }
"#;

fn paragraph(text: &str) -> Value {
    json!({ "type": "paragraph", "children": [{ "type": "text", "text": text }] })
}

fn seed() -> Seed {
    let long = "lorem ipsum ".repeat(40);
    serde_json::from_value(json!({
        "categories": [{ "id": "c-eng", "title": "Engineering" }],
        "users": [
            { "id": "u-admin", "email": "admin@example.com", "roles": ["admin"], "createdAt": "2024-01-01T00:00:00Z" },
            { "id": "u-ed1", "email": "ed1@example.com", "roles": ["editor"], "createdAt": "2024-01-01T00:00:00Z" },
            { "id": "u-ed2", "email": "ed2@example.com", "roles": ["editor"], "createdAt": "2024-01-01T00:00:00Z" },
            { "id": "u-cust", "email": "cust@example.com", "roles": ["customer"], "createdAt": "2024-01-01T00:00:00Z" }
        ],
        "posts": [
            {
                "id": "p1", "title": "First", "slug": "first", "createdAt": "2024-01-05T00:00:00Z",
                "author": "u-ed1", "category": "c-eng",
                "content": { "root": { "type": "root", "children": [paragraph("Hello"), paragraph("world")] } }
            },
            {
                "id": "p2", "title": "Second", "slug": "second", "createdAt": "2024-02-10T00:00:00Z",
                "author": "u-ed2",
                "content": { "root": { "type": "root", "children": [paragraph(&long)] } }
            },
            {
                "id": "p3", "title": "Third", "slug": "third", "createdAt": "2024-03-01T00:00:00Z",
                "author": "u-admin"
            }
        ]
    }))
    .unwrap()
}

pub async fn app() -> Router {
    let cfg = config::load_from_str(CONFIG).unwrap();
    let store = MemoryStore::from_seed(seed()).unwrap();
    let state = AppState::with_store(cfg, Arc::new(store)).await.unwrap();
    build_router(state)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}
