//! Axum router wiring.
//!
//! Public blog reads under `/v1/posts`, authenticated mutations on the same
//! collections, and a couple of operational endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    app_state::AppState,
    handlers::{posts, users},
    ops,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/v1/revalidate", post(ops::revalidate))
        .route("/v1/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/v1/posts/:key",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/v1/admin/posts", get(posts::admin_list_posts))
        .route("/v1/users", get(users::list_users).post(users::register))
        .route(
            "/v1/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(state)
}
