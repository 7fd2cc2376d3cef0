//! Service config loader (strict parsing).

pub mod schema;

use std::fs;

use folio_core::error::{FolioError, Result};

pub use schema::{AuthSection, BlogSection, ExcerptLengths, FolioConfig, ServerSection, StoreSection, TokenEntry};

/// Env var overriding the config path.
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "folio.yaml";

pub fn config_path() -> String {
    std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_from_file(path: &str) -> Result<FolioConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| FolioError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<FolioConfig> {
    let cfg: FolioConfig = serde_yaml::from_str(s)
        .map_err(|e| FolioError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
