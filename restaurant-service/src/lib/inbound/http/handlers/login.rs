use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::present;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::router::AppState;

/// Exchange email and password for an access token.
///
/// Unknown emails and wrong passwords get the same answer.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let email = present(body.email).ok_or(UserError::MissingField("email"))?;
    let password = present(body.password).ok_or(UserError::MissingField("password"))?;

    let user = state
        .credentials
        .find_by_unique_field(&email.trim().to_lowercase())
        .await?
        .ok_or(UserError::InvalidCredentials)?;

    let claims = auth::Claims::for_user(user.id, user.role, state.jwt_expiration_hours);

    let result = state
        .authenticator
        .authenticate(&password, &user.password_hash, &claims)
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                ApiError::from(UserError::InvalidCredentials)
            }
            auth::AuthenticationError::PasswordError(err) => {
                ApiError::InternalServerError(format!("Password verification failed: {}", err))
            }
            auth::AuthenticationError::JwtError(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {}", err))
            }
        })?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            access_token: result.access_token,
            user: (&user).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub user: LoggedInUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggedInUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for LoggedInUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            role: user.role,
        }
    }
}
