//! URL slugs for posts.

use crate::error::{FolioError, Result};

/// Lowercase `input`, keep ASCII word characters, and fold whitespace and
/// hyphen runs into a single `-`. Leading and trailing hyphens are dropped.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }
    out
}

/// Slug for a post being saved: the explicit one if given, else the title's.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String> {
    let source = match explicit {
        Some(s) if !s.trim().is_empty() => s,
        _ => title,
    };
    let slug = slugify(source);
    if slug.is_empty() {
        return Err(FolioError::BadRequest(format!(
            "cannot derive a slug from {source:?}"
        )));
    }
    Ok(slug)
}
