//! Folio core: the blog content model, access policy, and display helpers.
//!
//! Everything here is synchronous and pure. The crate carries no transport or
//! runtime dependencies so the web service, seed tooling, and tests can share
//! one definition of who may touch which post and how a post is summarised.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Policy predicates and excerpt extraction are total: malformed rich text
//! degrades to empty output and missing principals degrade to `Deny`.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]

pub mod access;
pub mod content;
pub mod error;

/// Shared result type.
pub use error::{Result, FolioError};
