//! Shared application state for the Folio web service.
//!
//! Built once at startup: maps bearer tokens to user ids, opens the
//! document store, and sets up the post cache. Startup errors surface as
//! `Result` instead of panicking.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use folio_core::access::{Principal, PrincipalId};
use folio_core::error::{FolioError, Result};

use crate::cache::PostCache;
use crate::config::FolioConfig;
use crate::store::{DocumentStore, MemoryStore, Seed};

const FAIL_FAST_ON_UNKNOWN_TOKEN_USER: bool = false; // if changed to true, boot fails.

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    store: Arc<dyn DocumentStore>,
    cache: Arc<PostCache>,
}

struct AppStateInner {
    cfg: FolioConfig,
    tokens: HashMap<String, PrincipalId>,
}

impl AppState {
    /// Build state with the in-memory store, seeded if configured.
    pub async fn new(cfg: FolioConfig) -> Result<Self> {
        let store = match &cfg.store.seed_path {
            Some(path) => MemoryStore::from_seed(Seed::from_file(path)?)?,
            None => MemoryStore::new(),
        };
        Self::with_store(cfg, Arc::new(store)).await
    }

    pub async fn with_store(cfg: FolioConfig, store: Arc<dyn DocumentStore>) -> Result<Self> {
        let mut tokens = HashMap::new();
        for t in &cfg.auth.tokens {
            // token principals should exist as user records
            if let Err(e) = store.get_user(t.user_id.as_str(), None).await {
                tracing::warn!(user_id = %t.user_id, error = %e, "auth token refers to unknown user");
                if FAIL_FAST_ON_UNKNOWN_TOKEN_USER {
                    return Err(FolioError::BadRequest(format!(
                        "auth token user {} not found in store",
                        t.user_id
                    )));
                }
            }
            tokens.insert(t.token.clone(), t.user_id.clone());
        }

        let cache = Arc::new(PostCache::new(Duration::from_secs(cfg.blog.revalidate_secs)));

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, tokens }),
            store,
            cache,
        })
    }

    pub fn cfg(&self) -> &FolioConfig {
        &self.inner.cfg
    }

    /// Resolve a bearer token to the principal of its user as currently
    /// stored. Tokens whose user no longer exists fail authentication.
    pub async fn resolve_token(&self, token: &str) -> Result<Principal> {
        let user_id = self.inner.tokens.get(token).ok_or(FolioError::AuthFailed)?;
        match self.store.get_user(user_id.as_str(), None).await {
            Ok(user) => Ok(Principal::new(user.id, user.roles)),
            Err(FolioError::NotFound(_)) => {
                tracing::debug!(user_id = %user_id, "token user no longer exists");
                Err(FolioError::AuthFailed)
            }
            Err(e) => Err(e),
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn cache(&self) -> &PostCache {
        &self.cache
    }
}
