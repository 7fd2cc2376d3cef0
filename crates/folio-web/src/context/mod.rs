//! Request context types shared across handlers.
//!
//! The principal is resolved once per request from its headers and passed
//! explicitly into every policy call; nothing reads a "current user" globally.

pub mod principal;

pub use principal::{resolve_principal, CurrentPrincipal};
