//! Extractors over the [`AuthContext`] that `resolve_auth_context` stores in
//! request extensions. Each one runs the matching guard.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::auth::guards;
use crate::domain::auth::models::AuthContext;
use crate::domain::auth::models::IdentityClaims;
use crate::inbound::http::handlers::ApiError;

fn auth_context(parts: &Parts) -> AuthContext {
    parts
        .extensions
        .get::<AuthContext>()
        .copied()
        .unwrap_or_default()
}

/// The request's context, authenticated or not.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthenticated(pub AuthContext);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuthenticated
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(auth_context(parts)))
    }
}

/// Claims of an authenticated caller; 401 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated(pub IdentityClaims);

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = auth_context(parts);
        let claims = guards::require_authenticated(&context)?;
        Ok(Self(*claims))
    }
}

/// Claims of an admin caller; 401 when anonymous, 403 for other roles.
#[derive(Debug, Clone, Copy)]
pub struct AdminOnly(pub IdentityClaims);

#[async_trait]
impl<S> FromRequestParts<S> for AdminOnly
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = auth_context(parts);
        let claims = guards::require_admin(&context)?;
        Ok(Self(*claims))
    }
}

/// `Json` that rejects with the API's `{"error": ..}` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
