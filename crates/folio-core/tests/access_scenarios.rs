//! End-to-end access scenarios across both collections.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use folio_core::access::{
    evaluate, AccessDecision, Collection, Operation, OwnerField, OwnerFilter, Principal,
    PrincipalId, Role, RoleSet,
};

fn principal(id: &str, roles: &[Role]) -> Principal {
    Principal::new(id, roles.iter().copied().collect::<RoleSet>())
}

#[test]
fn editor_updating_someone_elses_post_is_filtered_out() {
    let editor = principal("u1", &[Role::Editor]);
    let post_author = "u2";

    let d = evaluate(Collection::Posts, Operation::Update, Some(&editor), None);
    assert_eq!(
        d,
        AccessDecision::FilteredAllow(OwnerFilter::new(OwnerField::Author, PrincipalId::new("u1")))
    );
    assert!(!d.permits_owner(post_author));
}

#[test]
fn anonymous_visitor() {
    assert_eq!(
        evaluate(Collection::Posts, Operation::Read, None, None),
        AccessDecision::Allow
    );
    assert_eq!(
        evaluate(Collection::Posts, Operation::Create, None, None),
        AccessDecision::Deny
    );
    assert_eq!(
        evaluate(Collection::Users, Operation::Create, None, None),
        AccessDecision::Allow
    );
    assert_eq!(
        evaluate(Collection::Users, Operation::Read, None, None),
        AccessDecision::Deny
    );
}

#[test]
fn multi_role_principal_takes_the_strongest_grant() {
    let p = principal("m1", &[Role::Customer, Role::Editor]);
    assert_eq!(
        evaluate(Collection::Posts, Operation::Create, Some(&p), None),
        AccessDecision::Allow
    );
    assert!(evaluate(Collection::Posts, Operation::Update, Some(&p), None)
        .filter()
        .is_some());

    let p = principal("m2", &[Role::Editor, Role::Admin]);
    assert_eq!(
        evaluate(Collection::Posts, Operation::Update, Some(&p), None),
        AccessDecision::Allow
    );
    assert_eq!(
        evaluate(Collection::Posts, Operation::Delete, Some(&p), None),
        AccessDecision::Allow
    );
}

#[test]
fn customer_reads_only_own_user_record() {
    let c = principal("c1", &[Role::Customer]);
    let target = PrincipalId::new("c2");
    let d = evaluate(Collection::Users, Operation::Read, Some(&c), Some(&target));
    assert!(d.permits_owner("c1"));
    assert!(!d.permits_owner("c2"));
}
