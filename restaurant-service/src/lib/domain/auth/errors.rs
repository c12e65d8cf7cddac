use thiserror::Error;

/// Terminal outcomes of authentication and access checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No credential, or a credential that failed verification.
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated, but not allowed to do this.
    #[error("{0}")]
    Forbidden(String),

    /// Token verified but its subject no longer exists.
    #[error("{0}")]
    SubjectNotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl AuthError {
    pub fn invalid_token() -> Self {
        AuthError::Unauthenticated("invalid token".to_string())
    }

    pub fn authentication_required() -> Self {
        AuthError::Unauthenticated("authentication required".to_string())
    }

    pub fn insufficient_privileges() -> Self {
        AuthError::Forbidden("insufficient privileges".to_string())
    }
}
