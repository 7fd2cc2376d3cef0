//! Shared error type across Folio crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Credentials present but not recognised.
    AuthFailed,
    /// Denied by access policy.
    NotAllowed,
    /// Record does not exist.
    NotFound,
    /// Unique constraint violated (slug, email, id).
    Conflict,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::AuthFailed => "AUTH_FAILED",
            ClientCode::NotAllowed => "NOT_ALLOWED",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Conflict => "CONFLICT",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FolioError>;

/// Unified error type used by core and web.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("auth failed")]
    AuthFailed,
    #[error("not allowed: {0}")]
    NotAllowed(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl FolioError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            FolioError::BadRequest(_) => ClientCode::BadRequest,
            FolioError::AuthFailed => ClientCode::AuthFailed,
            FolioError::NotAllowed(_) => ClientCode::NotAllowed,
            FolioError::NotFound(_) => ClientCode::NotFound,
            FolioError::Conflict(_) => ClientCode::Conflict,
            FolioError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            FolioError::Internal(_) => ClientCode::Internal,
        }
    }
}
