#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, send, ADMIN, CUSTOMER, EDITOR_1, EDITOR_2};

#[tokio::test]
async fn blog_index_features_newest_post() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/v1/posts", None, None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["featured"]["slug"], "third");
    assert!(body["featured"]["excerpt"].is_null());

    let cards = body["posts"].as_array().unwrap();
    let slugs: Vec<&str> = cards.iter().map(|c| c["slug"].as_str().unwrap()).collect();
    assert_eq!(slugs, ["second", "first"]);

    let second = &cards[0];
    let excerpt = second["excerpt"].as_str().unwrap();
    assert_eq!(excerpt.chars().count(), 120);
    assert!(excerpt.ends_with("..."));

    let first = &cards[1];
    assert_eq!(first["excerpt"], "Hello world");
    assert_eq!(first["date"], "January 5, 2024");
    assert_eq!(first["category"], "Engineering");
    assert_eq!(first["author"], "ed1@example.com");
    assert_eq!(first["href"], "/blog/first");
}

#[tokio::test]
async fn post_detail_lists_related_posts() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/v1/posts/first", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["title"], "First");
    assert_eq!(body["revalidate_secs"], 3600);

    let related: Vec<&str> = body["related"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap())
        .collect();
    assert_eq!(related, ["third", "second"]);
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/v1/posts/missing", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn anonymous_and_customer_cannot_create_posts() {
    let app = app().await;
    let req = json!({ "title": "Nope" });

    let (status, _) = send(&app, Method::POST, "/v1/posts", None, Some(req.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::POST, "/v1/posts", Some(CUSTOMER), Some(req)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_token_is_unauthorized() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/v1/admin/posts", Some("nope"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "AUTH_FAILED");
}

#[tokio::test]
async fn editor_creates_post_and_list_refreshes() {
    let app = app().await;
    // warm the cache first
    let _ = send(&app, Method::GET, "/v1/posts", None, None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/posts",
        Some(EDITOR_1),
        Some(json!({ "title": "Hello, Rust World!", "category": "c-eng" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["slug"], "hello-rust-world");
    assert_eq!(body["author"]["id"], "u-ed1");

    let (_, index) = send(&app, Method::GET, "/v1/posts", None, None).await;
    assert_eq!(index["featured"]["slug"], "hello-rust-world");
}

#[tokio::test]
async fn duplicate_slug_conflicts() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/posts",
        Some(ADMIN),
        Some(json!({ "title": "Again", "slug": "first" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn editor_cannot_attribute_post_to_someone_else() {
    let app = app().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/v1/posts",
        Some(EDITOR_1),
        Some(json!({ "title": "Ghost", "author": "u-ed2" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn editor_updates_only_own_posts() {
    let app = app().await;
    let patch = json!({ "title": "Edited" });

    let (status, body) = send(&app, Method::PATCH, "/v1/posts/p1", Some(EDITOR_1), Some(patch.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Edited");

    let (status, _) = send(&app, Method::PATCH, "/v1/posts/p1", Some(EDITOR_2), Some(patch)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_updates_any_post_and_reassigns_author() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/v1/posts/p2",
        Some(ADMIN),
        Some(json!({ "author": "u-ed1", "slug": "Second Edition" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"]["id"], "u-ed1");
    assert_eq!(body["slug"], "second-edition");
}

#[tokio::test]
async fn admin_listing_is_scoped_for_editors() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/v1/admin/posts", Some(EDITOR_2), None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body.as_array().unwrap().iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["p2"]);

    let (_, body) = send(&app, Method::GET, "/v1/admin/posts", Some(ADMIN), None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = send(&app, Method::GET, "/v1/admin/posts", Some(CUSTOMER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn only_admins_delete_posts() {
    let app = app().await;

    let (status, _) = send(&app, Method::DELETE, "/v1/posts/p1", Some(EDITOR_1), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::DELETE, "/v1/posts/p1", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/v1/posts/first", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/v1/posts/p1", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn revalidate_requires_author_role() {
    let app = app().await;

    let (status, _) = send(&app, Method::POST, "/v1/revalidate", Some(CUSTOMER), Some(json!({}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::POST, "/v1/revalidate", Some(EDITOR_1), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revalidated"], "posts");

    let (status, _) = send(
        &app,
        Method::POST,
        "/v1/revalidate",
        Some(ADMIN),
        Some(json!({ "tag": "pages" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn healthz_is_ok() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn stored_content_is_served_verbatim() {
    let app = app().await;
    let content = json!({ "root": { "type": "root", "children": [
        { "type": "heading", "tag": "h2", "children": [{ "type": "text", "format": 1, "text": "Title" }] },
        { "type": "block", "fields": { "blockType": "code", "code": "let x = 1;" } }
    ]}});
    let (status, _) = send(
        &app,
        Method::POST,
        "/v1/posts",
        Some(ADMIN),
        Some(json!({ "title": "Rich", "content": content.clone() })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/v1/posts/rich", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], content);
    assert_eq!(body["post"]["excerpt"], "Title");

    let (_, listing) = send(&app, Method::GET, "/v1/admin/posts", Some(ADMIN), None).await;
    let seeded = listing
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["slug"] == "second")
        .unwrap();
    assert_eq!(seeded["content"]["root"]["children"][0]["type"], "paragraph");
}
