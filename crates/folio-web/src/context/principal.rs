use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use folio_core::access::Principal;
use folio_core::error::{FolioError, Result};

use crate::app_state::AppState;
use crate::error::ApiError;

/// Principal for the current request; `None` when no credentials were sent.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Option<Principal>);

impl CurrentPrincipal {
    pub fn get(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> std::result::Result<Self, Self::Rejection> {
        let principal = resolve_principal(state, &parts.headers).await?;
        Ok(CurrentPrincipal(principal))
    }
}

/// Resolve `Authorization: Bearer <token>` to a principal.
///
/// No header means anonymous. A malformed header or unknown token is an error,
/// never a silent downgrade to anonymous. Roles come from the user record, so
/// role changes and deletions apply from the next request on.
pub async fn resolve_principal(state: &AppState, headers: &HeaderMap) -> Result<Option<Principal>> {
    let Some(raw) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = raw
        .to_str()
        .map_err(|_| FolioError::BadRequest("authorization header is not ascii".into()))?;
    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| FolioError::BadRequest("expected bearer authorization".into()))?;
    state.resolve_token(token).await.map(Some)
}
