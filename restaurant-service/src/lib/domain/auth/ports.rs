use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Read-only view of user records used to authenticate requests.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Look a token subject up by id.
    async fn find_by_identity(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Look a login up by its unique field, the lowercased email.
    async fn find_by_unique_field(&self, email: &str) -> Result<Option<User>, UserError>;
}

#[async_trait]
impl<T> CredentialStore for T
where
    T: UserRepository + ?Sized,
{
    async fn find_by_identity(&self, id: &UserId) -> Result<Option<User>, UserError> {
        self.find_by_id(id).await
    }

    async fn find_by_unique_field(&self, email: &str) -> Result<Option<User>, UserError> {
        self.find_by_email(email).await
    }
}
