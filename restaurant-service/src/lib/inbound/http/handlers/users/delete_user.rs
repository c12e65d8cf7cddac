use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::load_owned_user;
use super::UserData;
use crate::inbound::http::extractors::MaybeAuthenticated;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    MaybeAuthenticated(context): MaybeAuthenticated,
    Path(uid): Path<String>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user = load_owned_user(&state, &context, &uid).await?;

    state
        .user_service
        .delete_user(&user.id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
