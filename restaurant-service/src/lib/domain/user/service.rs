use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Page;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserLookup;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Hasher applied to every stored password
    pub fn new(repository: Arc<UR>, password_hasher: auth::PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    fn hash(&self, password: &str) -> Result<String, UserError> {
        self.password_hasher
            .hash(password)
            .map_err(|e| UserError::Password(e.to_string()))
    }

    async fn ensure_email_free(
        &self,
        email: &EmailAddress,
        owner: Option<&UserId>,
    ) -> Result<(), UserError> {
        match self.repository.find_by_email(email.as_str()).await? {
            Some(existing) if Some(&existing.id) != owner => {
                Err(UserError::EmailAlreadyExists(email.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        self.ensure_email_free(&command.email, None).await?;

        let password_hash = self.hash(&command.password)?;
        let now = Utc::now();

        let user = User {
            id: UserId::new(),
            email: command.email,
            role: command.role,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, role = %created.role, "User created");

        Ok(created)
    }

    async fn get_user(&self, lookup: &UserLookup) -> Result<User, UserError> {
        let found = match lookup {
            UserLookup::Id(id) => self.repository.find_by_id(id).await?,
            UserLookup::Email(email) => self.repository.find_by_email(email).await?,
        };

        found.ok_or_else(|| UserError::NotFound(lookup.to_string()))
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>, UserError> {
        self.repository.list(page).await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            if new_email != user.email {
                self.ensure_email_free(&new_email, Some(id)).await?;
                user.email = new_email;
            }
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.hash(&new_password)?;
        }

        if let Some(new_role) = command.role {
            user.role = new_role;
        }

        user.updated_at = Utc::now();

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<User, UserError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(user)
    }

    async fn ensure_admin(
        &self,
        email: EmailAddress,
        password: String,
    ) -> Result<Option<User>, UserError> {
        if self.repository.find_by_email(email.as_str()).await?.is_some() {
            return Ok(None);
        }

        let command = CreateUserCommand::new(email, password, Role::Admin);
        self.create_user(command).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn list(&self, page: Page) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    fn hasher() -> auth::PasswordHasher {
        auth::PasswordHasher::with_params(1024, 1, 1).unwrap()
    }

    fn existing_user(email: &str, role: Role) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            role,
            password_hash: "$argon2id$stored".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .with(eq("chef@example.com"))
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "chef@example.com"
                    && user.role == Role::Chef
                    && user.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(Ok);

        let service = UserService::new(Arc::new(repository), hasher());

        let command = CreateUserCommand::new(
            EmailAddress::new("chef@example.com".to_string()).unwrap(),
            "password123".to_string(),
            Role::Chef,
        );

        let user = service.create_user(command).await.unwrap();
        assert_eq!(user.role, Role::Chef);
        assert_ne!(user.password_hash, "password123");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_is_rejected_before_hashing() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(existing_user(email, Role::Waiter))));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), hasher());

        let command = CreateUserCommand::new(
            EmailAddress::new("waiter@example.com".to_string()).unwrap(),
            "password123".to_string(),
            Role::Waiter,
        );

        let result = service.create_user(command).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_get_user_by_email_lookup() {
        let mut repository = MockTestUserRepository::new();
        let user = existing_user("waiter@example.com", Role::Waiter);
        let expected = user.clone();

        repository.expect_find_by_id().times(0);
        repository
            .expect_find_by_email()
            .with(eq("waiter@example.com"))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), hasher());

        let found = service
            .get_user(&UserLookup::parse("waiter@example.com"))
            .await
            .unwrap();
        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service.get_user(&UserLookup::Id(UserId::new())).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_user_to_email_of_another_user_is_rejected() {
        let mut repository = MockTestUserRepository::new();
        let user = existing_user("waiter@example.com", Role::Waiter);
        let id = user.id;

        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_find_by_email()
            .with(eq("chef@example.com"))
            .returning(|email| Ok(Some(existing_user(email, Role::Chef))));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository), hasher());

        let command = UpdateUserCommand {
            email: Some(EmailAddress::new("chef@example.com".to_string()).unwrap()),
            ..Default::default()
        };

        let result = service.update_user(&id, command).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_user_changes_only_given_fields() {
        let mut repository = MockTestUserRepository::new();
        let user = existing_user("waiter@example.com", Role::Waiter);
        let id = user.id;

        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_update()
            .withf(|user| {
                user.email.as_str() == "waiter@example.com"
                    && user.role == Role::Chef
                    && user.password_hash == "$argon2id$stored"
            })
            .times(1)
            .returning(Ok);

        let service = UserService::new(Arc::new(repository), hasher());

        let command = UpdateUserCommand {
            role: Some(Role::Chef),
            ..Default::default()
        };

        let updated = service.update_user(&id, command).await.unwrap();
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_delete_user_returns_deleted_user() {
        let mut repository = MockTestUserRepository::new();
        let user = existing_user("chef@example.com", Role::Chef);
        let id = user.id;
        let expected = user.clone();

        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository), hasher());

        assert_eq!(service.delete_user(&id).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .returning(|email| Ok(Some(existing_user(email, Role::Admin))));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), hasher());

        let created = service
            .ensure_admin(
                EmailAddress::new("admin@example.com".to_string()).unwrap(),
                "secret".to_string(),
            )
            .await
            .unwrap();
        assert!(created.is_none());
    }
}
