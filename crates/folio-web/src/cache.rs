//! Post list cache with age-based revalidation and tag invalidation.
//!
//! Public list/detail views read the full post list through here. An entry is
//! refetched once it is older than `revalidate_secs`, or right away after the
//! `posts` tag is invalidated (post mutations, `/v1/revalidate`).

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use folio_core::content::Post;
use folio_core::error::Result;

use crate::store::{DocumentStore, PostQuery};

/// The only tag the post cache answers to.
pub const POSTS_TAG: &str = "posts";

struct Entry {
    posts: Arc<Vec<Post>>,
    fetched_at: Instant,
}

pub struct PostCache {
    max_age: Duration,
    entry: RwLock<Option<Entry>>,
}

impl PostCache {
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            entry: RwLock::new(None),
        }
    }

    /// Cached posts, newest first; refetches when stale or invalidated.
    pub async fn posts(&self, store: &dyn DocumentStore) -> Result<Arc<Vec<Post>>> {
        {
            let guard = self.entry.read().await;
            if let Some(e) = guard.as_ref() {
                if e.fetched_at.elapsed() < self.max_age {
                    return Ok(Arc::clone(&e.posts));
                }
            }
        }

        let mut guard = self.entry.write().await;
        // another request may have refreshed while we waited for the lock
        if let Some(e) = guard.as_ref() {
            if e.fetched_at.elapsed() < self.max_age {
                return Ok(Arc::clone(&e.posts));
            }
        }

        let posts = Arc::new(store.find_posts(&PostQuery::default()).await?);
        tracing::debug!(count = posts.len(), "post cache refreshed");
        *guard = Some(Entry {
            posts: Arc::clone(&posts),
            fetched_at: Instant::now(),
        });
        Ok(posts)
    }

    /// Drop the cached list so the next read refetches.
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }

    /// Invalidate by tag. Returns false for tags this cache does not own.
    pub async fn invalidate_tag(&self, tag: &str) -> bool {
        if tag != POSTS_TAG {
            return false;
        }
        self.invalidate().await;
        tracing::info!(tag, "cache tag invalidated");
        true
    }
}
