//! Access policy (roles, ownership filters, per-collection rules).
//!
//! Predicates are pure functions of an explicit principal. A decision is one of
//! `Allow`, `Deny`, or `FilteredAllow(owner == principal)`; the last must be
//! pushed down to the store as a row filter.

pub mod collections;
pub mod decision;
pub mod principal;
pub mod rules;

pub use collections::{evaluate, posts_access, user_roles_field_access, users_access, Collection, Operation};
pub use decision::{AccessDecision, OwnerField, OwnerFilter};
pub use principal::{Principal, PrincipalId, Role, RoleSet};
pub use rules::{
    can_access_posts, can_create_posts, can_delete_posts, can_update_posts, is_admin,
    is_admin_field_level, is_admin_or_editor, is_admin_or_self,
};
