//! Document store interface (the CMS query surface).
//!
//! Access decisions reach the store as an optional [`OwnerFilter`]. Reads drop
//! records the filter rejects; single-record reads and writes that miss the
//! filter fail with `NotAllowed`.

pub mod memory;

use async_trait::async_trait;
use serde::Deserialize;

use folio_core::access::{OwnerField, OwnerFilter, PrincipalId, RoleSet};
use folio_core::content::{Post, RichText, User};
use folio_core::error::Result;

pub use memory::{MemoryStore, Seed};

/// Post listing query. Results are newest first.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub filter: Option<OwnerFilter>,
    pub slug: Option<String>,
}

/// Fields for a new post; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub content: Option<RichText>,
    pub category: Option<String>,
    pub author: PrincipalId,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub content: Option<RichText>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub author: Option<PrincipalId>,
}

#[derive(Debug, Clone)]
pub struct UserDraft {
    pub email: String,
    pub roles: RoleSet,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub roles: Option<RoleSet>,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_posts(&self, query: &PostQuery) -> Result<Vec<Post>>;
    async fn get_post(&self, id: &str) -> Result<Post>;
    async fn insert_post(&self, draft: PostDraft) -> Result<Post>;
    async fn update_post(&self, id: &str, filter: Option<&OwnerFilter>, patch: PostPatch) -> Result<Post>;
    async fn delete_post(&self, id: &str, filter: Option<&OwnerFilter>) -> Result<()>;

    async fn find_users(&self, filter: Option<&OwnerFilter>) -> Result<Vec<User>>;
    async fn get_user(&self, id: &str, filter: Option<&OwnerFilter>) -> Result<User>;
    async fn insert_user(&self, draft: UserDraft) -> Result<User>;
    async fn update_user(&self, id: &str, filter: Option<&OwnerFilter>, patch: UserPatch) -> Result<User>;
    async fn delete_user(&self, id: &str) -> Result<()>;
}

/// Whether `post` passes an optional ownership filter.
pub fn post_passes(filter: Option<&OwnerFilter>, post: &Post) -> bool {
    match filter {
        None => true,
        Some(f) => match f.field {
            OwnerField::Author => f.matches(post.author_id()),
            OwnerField::Id => f.matches(&post.id),
        },
    }
}

/// Whether `user` passes an optional ownership filter.
pub fn user_passes(filter: Option<&OwnerFilter>, user: &User) -> bool {
    filter.map_or(true, |f| f.matches(user.id.as_str()))
}
