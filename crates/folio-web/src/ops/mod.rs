//! Operational HTTP endpoints.
//!
//! - `/healthz`       : liveness
//! - `/v1/revalidate` : drop cached post lists by tag (admin/editor)

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use folio_core::access::{is_admin_or_editor, Collection, Operation};
use folio_core::error::FolioError;

use crate::app_state::AppState;
use crate::cache::POSTS_TAG;
use crate::context::CurrentPrincipal;
use crate::error::ApiResult;
use crate::handlers::require;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevalidateReq {
    #[serde(default = "default_tag")]
    pub tag: String,
}

fn default_tag() -> String {
    POSTS_TAG.to_string()
}

pub async fn revalidate(
    State(app): State<AppState>,
    principal: CurrentPrincipal,
    Json(req): Json<RevalidateReq>,
) -> ApiResult<Json<serde_json::Value>> {
    require(is_admin_or_editor(principal.get()), Collection::Posts, Operation::Update)?;
    if !app.cache().invalidate_tag(&req.tag).await {
        return Err(FolioError::BadRequest(format!("unknown cache tag: {}", req.tag)).into());
    }
    Ok(Json(json!({ "revalidated": req.tag })))
}
