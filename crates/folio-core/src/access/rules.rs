//! Role predicates shared by every collection.
//!
//! Each takes the (possibly absent) principal explicitly; there is no ambient
//! "current user". Missing principals and empty role sets fail closed.

use super::decision::{AccessDecision, OwnerField, OwnerFilter};
use super::principal::{Principal, PrincipalId, Role};

pub fn is_admin(principal: Option<&Principal>) -> AccessDecision {
    AccessDecision::from_bool(principal.is_some_and(Principal::is_admin))
}

pub fn is_admin_or_editor(principal: Option<&Principal>) -> AccessDecision {
    AccessDecision::from_bool(
        principal.is_some_and(|p| p.roles().contains_any(&[Role::Admin, Role::Editor])),
    )
}

/// Admins see every record; anyone else is restricted to the record whose id
/// is their own.
///
/// `_target_owner` is accepted for call-site symmetry only. The returned filter
/// always pins the principal's id and the store must apply it.
pub fn is_admin_or_self(
    principal: Option<&Principal>,
    _target_owner: Option<&PrincipalId>,
) -> AccessDecision {
    let Some(p) = principal else {
        return AccessDecision::Deny;
    };
    if p.is_admin() {
        return AccessDecision::Allow;
    }
    AccessDecision::FilteredAllow(OwnerFilter::new(OwnerField::Id, p.id().clone()))
}

/// Field-scoped variant of [`is_admin`].
pub fn is_admin_field_level(principal: Option<&Principal>) -> AccessDecision {
    is_admin(principal)
}

/// Admin: all posts. Editor: own posts. Anyone else: nothing.
fn admin_all_editor_own(principal: Option<&Principal>) -> AccessDecision {
    let Some(p) = principal else {
        return AccessDecision::Deny;
    };
    if p.is_admin() {
        return AccessDecision::Allow;
    }
    if p.is_editor() {
        return AccessDecision::FilteredAllow(OwnerFilter::new(OwnerField::Author, p.id().clone()));
    }
    AccessDecision::Deny
}

/// Back-office post listing.
pub fn can_access_posts(principal: Option<&Principal>) -> AccessDecision {
    admin_all_editor_own(principal)
}

pub fn can_create_posts(principal: Option<&Principal>) -> AccessDecision {
    is_admin_or_editor(principal)
}

pub fn can_update_posts(principal: Option<&Principal>) -> AccessDecision {
    admin_all_editor_own(principal)
}

pub fn can_delete_posts(principal: Option<&Principal>) -> AccessDecision {
    is_admin(principal)
}
