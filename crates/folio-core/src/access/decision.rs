use std::fmt;

use serde::Serialize;

use super::principal::PrincipalId;

/// Record field an ownership filter constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerField {
    /// The record's own id (user records).
    Id,
    /// The `author` relation (posts).
    Author,
}

impl OwnerField {
    pub fn as_str(self) -> &'static str {
        match self {
            OwnerField::Id => "id",
            OwnerField::Author => "author",
        }
    }
}

/// "`field` equals `equals`" row filter handed to the store layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerFilter {
    pub field: OwnerField,
    pub equals: PrincipalId,
}

impl OwnerFilter {
    pub fn new(field: OwnerField, equals: PrincipalId) -> Self {
        Self { field, equals }
    }

    /// Evaluate the predicate against a record whose `field` holds `owner`.
    pub fn matches(&self, owner: &str) -> bool {
        self.equals.as_str() == owner
    }
}

impl fmt::Display for OwnerFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} == {}", self.field.as_str(), self.equals)
    }
}

/// Outcome of access-policy evaluation.
///
/// `FilteredAllow` is only ever produced for a present principal; callers must
/// apply it as a query constraint, never collapse it into a boolean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny,
    FilteredAllow(OwnerFilter),
}

impl AccessDecision {
    pub fn from_bool(allowed: bool) -> Self {
        if allowed {
            AccessDecision::Allow
        } else {
            AccessDecision::Deny
        }
    }

    pub fn is_deny(&self) -> bool {
        matches!(self, AccessDecision::Deny)
    }

    pub fn filter(&self) -> Option<&OwnerFilter> {
        match self {
            AccessDecision::FilteredAllow(f) => Some(f),
            _ => None,
        }
    }

    /// Whether a record owned by `owner` is reachable under this decision.
    pub fn permits_owner(&self, owner: &str) -> bool {
        match self {
            AccessDecision::Allow => true,
            AccessDecision::Deny => false,
            AccessDecision::FilteredAllow(f) => f.matches(owner),
        }
    }
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessDecision::Allow => f.write_str("allow"),
            AccessDecision::Deny => f.write_str("deny"),
            AccessDecision::FilteredAllow(filter) => write!(f, "filtered({filter})"),
        }
    }
}
