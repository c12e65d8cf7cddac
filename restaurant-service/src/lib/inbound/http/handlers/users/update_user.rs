use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::load_owned_user;
use super::UserData;
use crate::domain::auth::guards;
use crate::domain::auth::models::IdentityClaims;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RoleSet;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::extractors::MaybeAuthenticated;
use crate::inbound::http::handlers::present;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl UpdateUserRequest {
    fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.role.is_none()
    }

    /// Only admins may change a role. The role is validated first, then a
    /// non-admin sending anything other than the current role is refused.
    fn try_into_command(
        self,
        caller: &IdentityClaims,
        target: &User,
        roles: &RoleSet,
    ) -> Result<UpdateUserCommand, ApiError> {
        let role = self
            .role
            .map(|role| roles.parse(&role))
            .transpose()
            .map_err(UserError::from)?;

        if let Some(role) = role {
            if !caller.is_admin() && role != target.role {
                return Err(ApiError::Forbidden(
                    "only admins can change roles".to_string(),
                ));
            }
        }

        let email = self
            .email
            .map(EmailAddress::new)
            .transpose()
            .map_err(UserError::from)?;

        let password = self
            .password
            .map(|password| present(Some(password)).ok_or(UserError::MissingField("password")))
            .transpose()?;

        Ok(UpdateUserCommand {
            email,
            password,
            role,
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    MaybeAuthenticated(context): MaybeAuthenticated,
    Path(uid): Path<String>,
    JsonBody(body): JsonBody<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user = load_owned_user(&state, &context, &uid).await?;
    let caller = *guards::require_authenticated(&context)?;

    if body.is_empty() {
        return Err(ApiError::BadRequest(
            "email, password or role is required".to_string(),
        ));
    }

    let command = body.try_into_command(&caller, &user, &state.roles)?;

    state
        .user_service
        .update_user(&user.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
