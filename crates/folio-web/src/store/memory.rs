//! In-memory document store, optionally seeded from JSON.
//!
//! Unique keys (post slugs, user emails) are claimed in their own index maps
//! through `DashMap::entry`, so concurrent writers cannot both take one.

use std::fs;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};
use serde::Deserialize;

use folio_core::access::{OwnerFilter, PrincipalId};
use folio_core::content::{Author, Category, Post, Relation, User};
use folio_core::error::{FolioError, Result};

use super::{post_passes, user_passes, DocumentStore, PostDraft, PostPatch, PostQuery, UserDraft, UserPatch};

/// Initial store contents.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl Seed {
    pub fn from_file(path: &str) -> Result<Self> {
        let s = fs::read_to_string(path)
            .map_err(|e| FolioError::Internal(format!("read seed failed: {e}")))?;
        serde_json::from_str(&s).map_err(|e| FolioError::BadRequest(format!("invalid seed json: {e}")))
    }
}

/// Insertion order breaks `created_at` ties.
#[derive(Debug, Clone)]
struct Stored<T> {
    seq: u64,
    doc: T,
}

/// Claim `key` for `owner`. A key already held by `owner` is claimed again.
fn claim(index: &DashMap<String, String>, key: &str, owner: &str) -> bool {
    match index.entry(key.to_string()) {
        Entry::Occupied(e) => e.get() == owner,
        Entry::Vacant(e) => {
            e.insert(owner.to_string());
            true
        }
    }
}

fn release(index: &DashMap<String, String>, key: &str, owner: &str) {
    index.remove_if(key, |_, held_by| held_by == owner);
}

fn email_key(email: &str) -> String {
    email.to_ascii_lowercase()
}

#[derive(Default)]
pub struct MemoryStore {
    seq: AtomicU64,
    posts: DashMap<String, Stored<Post>>,
    categories: DashMap<String, Category>,
    users: DashMap<String, Stored<User>>,
    /// slug -> post id
    slugs: DashMap<String, String>,
    /// lowercased email -> user id
    emails: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(mut seed: Seed) -> Result<Self> {
        let store = Self::new();
        for c in seed.categories {
            store.categories.insert(c.id.clone(), c);
        }
        for u in seed.users {
            if !claim(&store.emails, &email_key(&u.email), u.id.as_str()) {
                return Err(FolioError::Conflict(format!("seed: duplicate email {}", u.email)));
            }
            let seq = store.next_seq();
            store.users.insert(u.id.as_str().to_string(), Stored { seq, doc: u });
        }
        seed.posts.sort_by_key(|p| p.created_at);
        for mut p in seed.posts {
            if !claim(&store.slugs, &p.slug, &p.id) {
                return Err(FolioError::Conflict(format!("seed: duplicate slug {}", p.slug)));
            }
            p.author = Relation::Unpopulated(p.author.id().to_string());
            p.category = p.category.map(|c| Relation::Unpopulated(c.id().to_string()));
            let seq = store.next_seq();
            store.posts.insert(p.id.clone(), Stored { seq, doc: p });
        }
        tracing::info!(
            posts = store.posts.len(),
            users = store.users.len(),
            categories = store.categories.len(),
            "memory store seeded"
        );
        Ok(store)
    }

    pub fn insert_category(&self, category: Category) {
        self.categories.insert(category.id.clone(), category);
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn next_id(&self) -> (u64, String) {
        // Seeded ids are arbitrary strings; skip any we would collide with.
        loop {
            let seq = self.next_seq();
            let id = seq.to_string();
            if !self.posts.contains_key(&id) && !self.users.contains_key(&id) {
                return (seq, id);
            }
        }
    }

    fn check_category(&self, id: &str) -> Result<()> {
        if self.categories.contains_key(id) {
            Ok(())
        } else {
            Err(FolioError::BadRequest(format!("unknown category: {id}")))
        }
    }

    fn check_author(&self, id: &str) -> Result<()> {
        if self.users.contains_key(id) {
            Ok(())
        } else {
            Err(FolioError::BadRequest(format!("unknown author: {id}")))
        }
    }

    /// Replace relation ids with embedded records where they resolve.
    fn populate(&self, mut post: Post) -> Post {
        if let Some(Relation::Unpopulated(id)) = &post.category {
            if let Some(c) = self.categories.get(id) {
                post.category = Some(Relation::Populated(c.value().clone()));
            }
        }
        if let Relation::Unpopulated(id) = &post.author {
            if let Some(u) = self.users.get(id) {
                let author: Author = u.doc.as_author();
                post.author = Relation::Populated(author);
            }
        }
        post
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_posts(&self, query: &PostQuery) -> Result<Vec<Post>> {
        let mut hits: Vec<Stored<Post>> = self
            .posts
            .iter()
            .filter(|e| post_passes(query.filter.as_ref(), &e.doc))
            .filter(|e| query.slug.as_deref().map_or(true, |s| e.doc.slug == s))
            .map(|e| e.value().clone())
            .collect();
        hits.sort_by(|a, b| {
            b.doc
                .created_at
                .cmp(&a.doc.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(hits.into_iter().map(|s| self.populate(s.doc)).collect())
    }

    async fn get_post(&self, id: &str) -> Result<Post> {
        let post = self
            .posts
            .get(id)
            .map(|e| e.doc.clone())
            .ok_or_else(|| FolioError::NotFound(format!("post {id}")))?;
        Ok(self.populate(post))
    }

    async fn insert_post(&self, draft: PostDraft) -> Result<Post> {
        if let Some(c) = &draft.category {
            self.check_category(c)?;
        }
        self.check_author(draft.author.as_str())?;

        let (seq, id) = self.next_id();
        if !claim(&self.slugs, &draft.slug, &id) {
            return Err(FolioError::Conflict(format!("slug already in use: {}", draft.slug)));
        }
        let now = Utc::now();
        let post = Post {
            id: id.clone(),
            title: draft.title,
            slug: draft.slug,
            created_at: now,
            updated_at: Some(now),
            content: draft.content,
            category: draft.category.map(Relation::Unpopulated),
            author: Relation::Unpopulated(draft.author.as_str().to_string()),
        };
        self.posts.insert(id.clone(), Stored { seq, doc: post.clone() });
        tracing::debug!(post_id = %id, slug = %post.slug, "post inserted");
        Ok(self.populate(post))
    }

    async fn update_post(&self, id: &str, filter: Option<&OwnerFilter>, patch: PostPatch) -> Result<Post> {
        let updated = {
            let mut entry = self
                .posts
                .get_mut(id)
                .ok_or_else(|| FolioError::NotFound(format!("post {id}")))?;
            // ownership before slug and relation checks
            if !post_passes(filter, &entry.doc) {
                return Err(FolioError::NotAllowed(format!("update post {id}")));
            }
            if let Some(c) = &patch.category {
                self.check_category(c)?;
            }
            if let Some(a) = &patch.author {
                self.check_author(a.as_str())?;
            }
            if let Some(slug) = &patch.slug {
                if !claim(&self.slugs, slug, id) {
                    return Err(FolioError::Conflict(format!("slug already in use: {slug}")));
                }
            }

            let post = &mut entry.doc;
            let old_slug = post.slug.clone();
            if let Some(title) = patch.title {
                post.title = title;
            }
            if let Some(slug) = patch.slug {
                post.slug = slug;
            }
            if let Some(content) = patch.content {
                post.content = Some(content);
            }
            if let Some(category) = patch.category {
                post.category = Some(Relation::Unpopulated(category));
            }
            if let Some(author) = patch.author {
                post.author = Relation::Unpopulated(author.as_str().to_string());
            }
            post.updated_at = Some(Utc::now());
            if post.slug != old_slug {
                release(&self.slugs, &old_slug, id);
            }
            post.clone()
        };
        tracing::debug!(post_id = %id, "post updated");
        Ok(self.populate(updated))
    }

    async fn delete_post(&self, id: &str, filter: Option<&OwnerFilter>) -> Result<()> {
        let removed = self
            .posts
            .remove_if(id, |_, stored| post_passes(filter, &stored.doc));
        match removed {
            Some((_, stored)) => {
                release(&self.slugs, &stored.doc.slug, id);
                tracing::debug!(post_id = %id, "post deleted");
                Ok(())
            }
            None if self.posts.contains_key(id) => {
                Err(FolioError::NotAllowed(format!("delete post {id}")))
            }
            None => Err(FolioError::NotFound(format!("post {id}"))),
        }
    }

    async fn find_users(&self, filter: Option<&OwnerFilter>) -> Result<Vec<User>> {
        let mut hits: Vec<Stored<User>> = self
            .users
            .iter()
            .filter(|e| user_passes(filter, &e.doc))
            .map(|e| e.value().clone())
            .collect();
        hits.sort_by_key(|s| s.seq);
        Ok(hits.into_iter().map(|s| s.doc).collect())
    }

    async fn get_user(&self, id: &str, filter: Option<&OwnerFilter>) -> Result<User> {
        let user = self
            .users
            .get(id)
            .map(|e| e.doc.clone())
            .ok_or_else(|| FolioError::NotFound(format!("user {id}")))?;
        if !user_passes(filter, &user) {
            return Err(FolioError::NotAllowed(format!("read user {id}")));
        }
        Ok(user)
    }

    async fn insert_user(&self, draft: UserDraft) -> Result<User> {
        let (seq, id) = self.next_id();
        if !claim(&self.emails, &email_key(&draft.email), &id) {
            return Err(FolioError::Conflict(format!("email already registered: {}", draft.email)));
        }
        let user = User {
            id: PrincipalId::new(id.clone()),
            email: draft.email,
            roles: draft.roles,
            created_at: Utc::now(),
        };
        self.users.insert(id.clone(), Stored { seq, doc: user.clone() });
        tracing::debug!(user_id = %id, "user inserted");
        Ok(user)
    }

    async fn update_user(&self, id: &str, filter: Option<&OwnerFilter>, patch: UserPatch) -> Result<User> {
        let mut entry = self
            .users
            .get_mut(id)
            .ok_or_else(|| FolioError::NotFound(format!("user {id}")))?;
        if !user_passes(filter, &entry.doc) {
            return Err(FolioError::NotAllowed(format!("update user {id}")));
        }
        if let Some(email) = &patch.email {
            if !claim(&self.emails, &email_key(email), id) {
                return Err(FolioError::Conflict(format!("email already registered: {email}")));
            }
        }

        let user = &mut entry.doc;
        if let Some(email) = patch.email {
            let old_key = email_key(&user.email);
            user.email = email;
            if email_key(&user.email) != old_key {
                release(&self.emails, &old_key, id);
            }
        }
        if let Some(roles) = patch.roles {
            user.roles = roles;
        }
        tracing::debug!(user_id = %id, "user updated");
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        let (_, stored) = self
            .users
            .remove(id)
            .ok_or_else(|| FolioError::NotFound(format!("user {id}")))?;
        release(&self.emails, &email_key(&stored.doc.email), id);
        tracing::debug!(user_id = %id, "user deleted");
        Ok(())
    }
}
