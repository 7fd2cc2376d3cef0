//! Top-level facade crate for Folio.
//!
//! Re-exports the content/policy core and the web service so users can depend on a single crate.

pub mod core {
    pub use folio_core::*;
}

pub mod web {
    pub use folio_web::*;
}
