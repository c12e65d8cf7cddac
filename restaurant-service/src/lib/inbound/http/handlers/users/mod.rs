use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::guards;
use crate::domain::auth::models::AuthContext;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserLookup;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod list_users;
pub mod update_user;

pub use create_user::create_user;
pub use delete_user::delete_user;
pub use get_user::get_user;
pub use list_users::list_users;
pub use update_user::update_user;

/// User as returned by the API. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Load the user addressed by `uid` if the caller owns it or is an admin.
///
/// When `uid` is an id, ownership is checked before the lookup. For an email,
/// a non-admin gets 403 whether or not the address exists.
async fn load_owned_user(
    state: &AppState,
    context: &AuthContext,
    uid: &str,
) -> Result<User, ApiError> {
    let lookup = UserLookup::parse(uid);

    let caller = match &lookup {
        UserLookup::Id(id) => guards::require_owner_or_admin(context, id)?,
        UserLookup::Email(_) => guards::require_authenticated(context)?,
    };

    let user = match state.user_service.get_user(&lookup).await {
        Ok(user) => user,
        Err(UserError::NotFound(_)) if !caller.is_admin() => {
            return Err(AuthError::insufficient_privileges().into())
        }
        Err(e) => return Err(e.into()),
    };
    guards::require_owner_or_admin(context, &user.id)?;

    Ok(user)
}
