use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::auth::guards;
use crate::domain::auth::models::AuthContext;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Resolves the `Authorization` header and stores the resulting
/// [`AuthContext`] in request extensions.
///
/// Anonymous requests pass through with an empty context. Invalid tokens,
/// vanished subjects and store failures end the request here.
pub async fn resolve_auth_context(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Opaque bytes still go through the scheme check, so a bearer header with
    // a non-ASCII token is an invalid token rather than no header.
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    let context = state.resolver.resolve(authorization.as_deref()).await?;

    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

/// Route layer rejecting anonymous requests with 401.
pub async fn require_authenticated(req: Request, next: Next) -> Result<Response, ApiError> {
    let context = req
        .extensions()
        .get::<AuthContext>()
        .copied()
        .unwrap_or_default();

    guards::require_authenticated(&context)?;

    Ok(next.run(req).await)
}
