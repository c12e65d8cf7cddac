use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthContext;
use crate::domain::auth::models::BearerCredential;
use crate::domain::auth::models::IdentityClaims;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

/// Resolves the `Authorization` header of a request into an [`AuthContext`].
///
/// Outcomes:
/// * no header, or a scheme other than bearer: anonymous context
/// * bearer token that fails verification: `Unauthenticated`
/// * verified token whose subject is gone: `SubjectNotFound`
/// * credential store failure: `Internal`
/// * otherwise: context holding the token's subject and role
pub struct AuthContextResolver {
    authenticator: Arc<Authenticator>,
    credentials: Arc<dyn CredentialStore>,
}

impl AuthContextResolver {
    pub fn new(authenticator: Arc<Authenticator>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            authenticator,
            credentials,
        }
    }

    pub async fn resolve(&self, header: Option<&str>) -> Result<AuthContext, AuthError> {
        let Some(header) = header else {
            return Ok(AuthContext::anonymous());
        };

        let credential = BearerCredential::parse(header);
        if !credential.is_bearer() {
            return Ok(AuthContext::anonymous());
        }

        let claims = self.verify(credential.token)?;

        match self.credentials.find_by_identity(&claims.subject_id).await {
            Ok(Some(_)) => Ok(AuthContext::authenticated(claims)),
            Ok(None) => {
                tracing::warn!(subject_id = %claims.subject_id, "Token subject no longer exists");
                Err(AuthError::SubjectNotFound(format!(
                    "user {} not found",
                    claims.subject_id
                )))
            }
            Err(e) => {
                tracing::error!(subject_id = %claims.subject_id, "Credential lookup failed: {}", e);
                Err(AuthError::Internal(e.to_string()))
            }
        }
    }

    /// Verify a bearer token and decode its identity.
    ///
    /// # Errors
    /// * `Unauthenticated` - Bad signature, expired, missing `exp`, malformed
    ///   payload, or a subject or role that does not parse
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        let claims: Claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!("JWT validation failed: {}", e);
            AuthError::invalid_token()
        })?;

        let subject_id = claims
            .sub
            .as_deref()
            .ok_or_else(|| {
                tracing::warn!("Missing 'sub' claim in token");
                AuthError::invalid_token()
            })
            .and_then(|sub| {
                UserId::from_string(sub).map_err(|e| {
                    tracing::warn!("Failed to parse user ID from token: {}", e);
                    AuthError::invalid_token()
                })
            })?;

        let role = claims
            .role()
            .ok_or_else(|| {
                tracing::warn!("Missing 'role' claim in token");
                AuthError::invalid_token()
            })
            .and_then(|role| {
                role.parse::<Role>().map_err(|e| {
                    tracing::warn!("Unknown role in token: {}", e);
                    AuthError::invalid_token()
                })
            })?;

        Ok(IdentityClaims::new(subject_id, role))
    }
}
