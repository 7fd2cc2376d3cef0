use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use folio_core::access::{can_access_posts, evaluate, Collection, Operation, PrincipalId};
use folio_core::content::{resolve_slug, slugify, Post, RichText};
use folio_core::error::FolioError;

use super::require;
use crate::app_state::AppState;
use crate::context::CurrentPrincipal;
use crate::error::ApiResult;
use crate::store::{PostDraft, PostPatch, PostQuery};
use crate::views::{blog_index, post_detail, BlogIndex, PostDetail};

pub async fn list_posts(State(app): State<AppState>) -> ApiResult<Json<BlogIndex>> {
    let posts = app.cache().posts(app.store()).await?;
    Ok(Json(blog_index(&posts, &app.cfg().blog)))
}

pub async fn get_post(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<PostDetail>> {
    let posts = app.cache().posts(app.store()).await?;
    let detail = post_detail(&posts, &slug, &app.cfg().blog)
        .ok_or_else(|| FolioError::NotFound(format!("post {slug}")))?;
    Ok(Json(detail))
}

/// Back-office listing: admins see every post, editors their own.
pub async fn admin_list_posts(
    State(app): State<AppState>,
    principal: CurrentPrincipal,
) -> ApiResult<Json<Vec<Post>>> {
    let decision = require(can_access_posts(principal.get()), Collection::Posts, Operation::Read)?;
    let query = PostQuery {
        filter: decision.filter().cloned(),
        slug: None,
    };
    Ok(Json(app.store().find_posts(&query).await?))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostReq {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub content: Option<RichText>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub author: Option<PrincipalId>,
}

pub async fn create_post(
    State(app): State<AppState>,
    principal: CurrentPrincipal,
    Json(req): Json<CreatePostReq>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let p = principal.get();
    require(evaluate(Collection::Posts, Operation::Create, p, None), Collection::Posts, Operation::Create)?;
    let p = p.ok_or_else(|| FolioError::NotAllowed("create posts".into()))?;

    // Authors default to the creator; only admins may attribute to someone else.
    let author = match req.author {
        Some(a) if &a != p.id() && !p.is_admin() => {
            return Err(FolioError::NotAllowed("set post author".into()).into());
        }
        Some(a) => a,
        None => p.id().clone(),
    };

    if req.title.trim().is_empty() {
        return Err(FolioError::BadRequest("title must not be empty".into()).into());
    }
    let slug = resolve_slug(req.slug.as_deref(), &req.title)?;

    let post = app
        .store()
        .insert_post(PostDraft {
            title: req.title,
            slug,
            content: req.content,
            category: req.category,
            author,
        })
        .await?;
    app.cache().invalidate().await;
    tracing::info!(post_id = %post.id, principal = %p.id(), "post created");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(app): State<AppState>,
    principal: CurrentPrincipal,
    Path(id): Path<String>,
    Json(mut patch): Json<PostPatch>,
) -> ApiResult<Json<Post>> {
    let p = principal.get();
    let decision = require(
        evaluate(Collection::Posts, Operation::Update, p, None),
        Collection::Posts,
        Operation::Update,
    )?;

    if patch.author.is_some() && !p.is_some_and(|p| p.is_admin()) {
        return Err(FolioError::NotAllowed("set post author".into()).into());
    }
    if let Some(title) = &patch.title {
        if title.trim().is_empty() {
            return Err(FolioError::BadRequest("title must not be empty".into()).into());
        }
    }
    if let Some(slug) = patch.slug.take() {
        let slug = slugify(&slug);
        if slug.is_empty() {
            return Err(FolioError::BadRequest("slug must not be empty".into()).into());
        }
        patch.slug = Some(slug);
    }

    let post = app.store().update_post(&id, decision.filter(), patch).await?;
    app.cache().invalidate().await;
    Ok(Json(post))
}

pub async fn delete_post(
    State(app): State<AppState>,
    principal: CurrentPrincipal,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let decision = require(
        evaluate(Collection::Posts, Operation::Delete, principal.get(), None),
        Collection::Posts,
        Operation::Delete,
    )?;
    app.store().delete_post(&id, decision.filter()).await?;
    app.cache().invalidate().await;
    Ok(StatusCode::NO_CONTENT)
}
