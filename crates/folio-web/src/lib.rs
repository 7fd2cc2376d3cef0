//! Folio web service library entry.
//!
//! This crate wires config, principal resolution, the document store, the post
//! cache, and the HTTP handlers into one axum application. It is consumed by
//! the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod ops;
pub mod router;
pub mod store;
pub mod views;
