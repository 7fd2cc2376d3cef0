use std::collections::HashSet;

use serde::Deserialize;
use folio_core::access::PrincipalId;
use folio_core::error::{FolioError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub blog: BlogSection,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub auth: AuthSection,
}

impl FolioConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FolioError::UnsupportedVersion);
        }

        self.blog.validate()?;
        self.auth.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlogSection {
    /// Max age of the cached post list before the next read refetches it.
    #[serde(default = "default_revalidate_secs")]
    pub revalidate_secs: u64,

    /// How many other posts the detail view links to.
    #[serde(default = "default_related_posts")]
    pub related_posts: usize,

    #[serde(default)]
    pub excerpt: ExcerptLengths,
}

impl Default for BlogSection {
    fn default() -> Self {
        Self {
            revalidate_secs: default_revalidate_secs(),
            related_posts: default_related_posts(),
            excerpt: ExcerptLengths::default(),
        }
    }
}

impl BlogSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=86_400).contains(&self.revalidate_secs) {
            return Err(FolioError::BadRequest(
                "blog.revalidate_secs must be between 1 and 86400".into(),
            ));
        }
        if self.related_posts > 20 {
            return Err(FolioError::BadRequest(
                "blog.related_posts must be at most 20".into(),
            ));
        }
        self.excerpt.validate()
    }
}

fn default_revalidate_secs() -> u64 {
    120
}
fn default_related_posts() -> usize {
    3
}

/// Excerpt lengths per view slot, in characters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcerptLengths {
    #[serde(default = "default_featured")]
    pub featured: usize,
    #[serde(default = "default_card")]
    pub card: usize,
    #[serde(default = "default_related")]
    pub related: usize,
    #[serde(default = "default_detail")]
    pub detail: usize,
}

impl Default for ExcerptLengths {
    fn default() -> Self {
        Self {
            featured: default_featured(),
            card: default_card(),
            related: default_related(),
            detail: default_detail(),
        }
    }
}

impl ExcerptLengths {
    // Below 4 a truncated excerpt has no room for text before the ellipsis.
    const MIN: usize = 4;

    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("featured", self.featured),
            ("card", self.card),
            ("related", self.related),
            ("detail", self.detail),
        ] {
            if v < Self::MIN {
                return Err(FolioError::BadRequest(format!(
                    "blog.excerpt.{name} must be at least {}",
                    Self::MIN
                )));
            }
        }
        Ok(())
    }
}

fn default_featured() -> usize {
    200
}
fn default_card() -> usize {
    120
}
fn default_related() -> usize {
    100
}
fn default_detail() -> usize {
    folio_core::content::DEFAULT_EXCERPT_LEN
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// JSON seed loaded into the in-memory store at boot.
    #[serde(default)]
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,
}

impl AuthSection {
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for t in &self.tokens {
            if t.token.trim().is_empty() {
                return Err(FolioError::BadRequest("auth.tokens: token must not be empty".into()));
            }
            if !seen.insert(t.token.as_str()) {
                return Err(FolioError::BadRequest(format!(
                    "auth.tokens: duplicate token for user {}",
                    t.user_id
                )));
            }
        }
        Ok(())
    }
}

/// Bearer token and the user it authenticates as. Roles are read from the
/// user record on every request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenEntry {
    pub token: String,
    pub user_id: PrincipalId,
}
