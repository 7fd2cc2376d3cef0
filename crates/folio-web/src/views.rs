//! Response shapes for the blog list and detail pages.

use chrono::{DateTime, Utc};
use serde::Serialize;

use folio_core::access::{PrincipalId, RoleSet};
use folio_core::content::{
    author_identifier, category_name, format_post_date, get_excerpt, Post, RichText, User,
};

use crate::config::BlogSection;

/// Summary of one post as shown in lists.
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub href: String,
    pub excerpt: Option<String>,
    pub date: String,
    pub category: Option<String>,
    pub author: Option<String>,
}

impl PostCard {
    pub fn new(post: &Post, excerpt_len: usize) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            href: format!("/blog/{}", post.slug),
            excerpt: get_excerpt(post, excerpt_len),
            date: format_post_date(&post.created_at),
            category: category_name(post).map(str::to_string),
            author: author_identifier(post).map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlogIndex {
    pub featured: Option<PostCard>,
    pub posts: Vec<PostCard>,
}

/// Newest post is featured with a longer excerpt; the rest are cards.
pub fn blog_index(posts: &[Post], blog: &BlogSection) -> BlogIndex {
    let Some((first, rest)) = posts.split_first() else {
        return BlogIndex {
            featured: None,
            posts: Vec::new(),
        };
    };
    BlogIndex {
        featured: Some(PostCard::new(first, blog.excerpt.featured)),
        posts: rest
            .iter()
            .map(|p| PostCard::new(p, blog.excerpt.card))
            .collect(),
    }
}

#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub post: PostCard,
    pub content: Option<RichText>,
    pub related: Vec<PostCard>,
    pub revalidate_secs: u64,
}

/// Detail page for `slug`, or `None` if no post has it.
pub fn post_detail(posts: &[Post], slug: &str, blog: &BlogSection) -> Option<PostDetail> {
    let current = posts.iter().find(|p| p.slug == slug)?;
    let related = posts
        .iter()
        .filter(|p| p.id != current.id)
        .take(blog.related_posts)
        .map(|p| PostCard::new(p, blog.excerpt.related))
        .collect();
    Some(PostDetail {
        post: PostCard::new(current, blog.excerpt.detail),
        content: current.content.clone(),
        related,
        revalidate_secs: blog.revalidate_secs,
    })
}

/// User record as returned to a given reader; `roles` only when the reader
/// may see that field.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: PrincipalId,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<RoleSet>,
}

impl UserView {
    pub fn new(user: User, show_roles: bool) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            roles: show_roles.then_some(user.roles),
        }
    }
}
