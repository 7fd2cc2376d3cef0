//! Per-collection composition of the role predicates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::decision::AccessDecision;
use super::principal::{Principal, PrincipalId};
use super::rules::{
    can_create_posts, can_delete_posts, can_update_posts, is_admin, is_admin_field_level,
    is_admin_or_self,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Posts,
    Users,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Posts => "posts",
            Collection::Users => "users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Posts collection.
///
/// Public read is unconditional. Posts carry no published/draft state, so there
/// is nothing to filter drafts on; adding one needs a field on [`crate::content::Post`] first.
pub fn posts_access(op: Operation, principal: Option<&Principal>) -> AccessDecision {
    match op {
        Operation::Read => AccessDecision::Allow,
        Operation::Create => can_create_posts(principal),
        Operation::Update => can_update_posts(principal),
        Operation::Delete => can_delete_posts(principal),
    }
}

/// Users collection. Registration is open.
pub fn users_access(
    op: Operation,
    principal: Option<&Principal>,
    target: Option<&PrincipalId>,
) -> AccessDecision {
    match op {
        Operation::Create => AccessDecision::Allow,
        Operation::Read | Operation::Update => is_admin_or_self(principal, target),
        Operation::Delete => is_admin(principal),
    }
}

/// The `roles` field of a user record. Only admins may see or set it, including
/// on their own record.
pub fn user_roles_field_access(_op: Operation, principal: Option<&Principal>) -> AccessDecision {
    is_admin_field_level(principal)
}

/// Evaluate a collection-level decision and record it.
pub fn evaluate(
    collection: Collection,
    op: Operation,
    principal: Option<&Principal>,
    target: Option<&PrincipalId>,
) -> AccessDecision {
    let decision = match collection {
        Collection::Posts => posts_access(op, principal),
        Collection::Users => users_access(op, principal, target),
    };
    tracing::debug!(
        collection = %collection,
        op = %op,
        principal = principal.map(|p| p.id().as_str()).unwrap_or("anonymous"),
        decision = %decision,
        "access evaluated"
    );
    decision
}
