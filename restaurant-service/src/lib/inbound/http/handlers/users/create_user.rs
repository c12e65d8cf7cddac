use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::UserData;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RoleSet;
use crate::inbound::http::extractors::AdminOnly;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::handlers::present;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    AdminOnly(_): AdminOnly,
    JsonBody(body): JsonBody<CreateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = body.try_into_command(&state.roles)?;

    state
        .user_service
        .create_user(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for creating a user (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
}

impl CreateUserRequest {
    /// Presence of every field first, then role membership, then email format.
    fn try_into_command(self, roles: &RoleSet) -> Result<CreateUserCommand, UserError> {
        let email = present(self.email).ok_or(UserError::MissingField("email"))?;
        let password = present(self.password).ok_or(UserError::MissingField("password"))?;
        let role = present(self.role).ok_or(UserError::MissingField("role"))?;

        let role = roles.parse(&role)?;
        let email = EmailAddress::new(email)?;

        Ok(CreateUserCommand::new(email, password, role))
    }
}
