use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::UserData;
use crate::domain::user::models::Page;
use crate::inbound::http::extractors::AdminOnly;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListUsersParams {
    #[serde(rename = "_page")]
    page: Option<u32>,
    #[serde(rename = "_limit")]
    limit: Option<u32>,
}

impl From<ListUsersParams> for Page {
    fn from(params: ListUsersParams) -> Self {
        Page::new(
            params.page.unwrap_or(1),
            params.limit.unwrap_or(Page::DEFAULT_LIMIT),
        )
    }
}

pub async fn list_users(
    State(state): State<AppState>,
    AdminOnly(_): AdminOnly,
    Query(params): Query<ListUsersParams>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    state
        .user_service
        .list_users(params.into())
        .await
        .map_err(ApiError::from)
        .map(|users| {
            let data: Vec<UserData> = users.iter().map(|u| u.into()).collect();
            ApiSuccess::new(StatusCode::OK, data)
        })
}
