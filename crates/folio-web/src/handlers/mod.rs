//! HTTP handlers for the posts and users collections.

pub mod posts;
pub mod users;

use folio_core::access::{AccessDecision, Collection, Operation};
use folio_core::error::FolioError;

/// Turn a `Deny` into a client error; pass anything else through for the store.
pub(crate) fn require(
    decision: AccessDecision,
    collection: Collection,
    op: Operation,
) -> Result<AccessDecision, FolioError> {
    if decision.is_deny() {
        return Err(FolioError::NotAllowed(format!("{op} {collection}")));
    }
    Ok(decision)
}
