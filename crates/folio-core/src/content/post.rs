//! Post, category, and author records as returned by the document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::rich_text::RichText;
use crate::access::{PrincipalId, RoleSet};

/// Record that can sit behind a [`Relation`].
pub trait RelationTarget {
    fn id(&self) -> &str;
}

/// Relation field: either a raw foreign key or the embedded record, depending
/// on how deep the store populated the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Relation<T> {
    Populated(T),
    Unpopulated(#[serde(deserialize_with = "de_id")] String),
}

impl<T: RelationTarget> Relation<T> {
    pub fn id(&self) -> &str {
        match self {
            Relation::Populated(t) => t.id(),
            Relation::Unpopulated(id) => id,
        }
    }
}

impl<T> Relation<T> {
    pub fn populated(&self) -> Option<&T> {
        match self {
            Relation::Populated(t) => Some(t),
            Relation::Unpopulated(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
}

impl RelationTarget for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

/// User projection embedded in a post's `author` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub email: String,
}

impl RelationTarget for Author {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Relation<Category>>,
    pub author: Relation<Author>,
}

impl Post {
    /// Ownership id used by post access filters.
    pub fn author_id(&self) -> &str {
        self.author.id()
    }
}

/// Display name of the post's category, if the relation was populated.
pub fn category_name(post: &Post) -> Option<&str> {
    post.category
        .as_ref()
        .and_then(Relation::populated)
        .map(|c| c.title.as_str())
}

/// Contact identifier (email) of the post's author, if populated.
pub fn author_identifier(post: &Post) -> Option<&str> {
    post.author.populated().map(|a| a.email.as_str())
}

/// Account record in the users collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "de_principal_id")]
    pub id: PrincipalId,
    pub email: String,
    #[serde(default = "RoleSet::default_for_new_user")]
    pub roles: RoleSet,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn as_author(&self) -> Author {
        Author {
            id: self.id.as_str().to_string(),
            email: self.email.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Str(String),
    Num(i64),
}

/// Ids arrive as strings or integers depending on the store's backing DB.
fn de_id<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(d)? {
        RawId::Str(s) => s,
        RawId::Num(n) => n.to_string(),
    })
}

fn de_principal_id<'de, D>(d: D) -> Result<PrincipalId, D::Error>
where
    D: Deserializer<'de>,
{
    de_id(d).map(PrincipalId::new)
}
