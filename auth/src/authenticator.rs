use serde::Deserialize;
use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT handling.
///
/// Holds the signing secret it was constructed with.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator with the default Argon2id hasher.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing and verification
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_password_hasher(jwt_secret, PasswordHasher::new())
    }

    /// Create an authenticator with a specific password hasher.
    pub fn with_password_hasher(jwt_secret: &[u8], password_hasher: PasswordHasher) -> Self {
        Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials, then sign `claims` into an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    /// * `JwtError` - Token generation failed
    pub fn authenticate<T: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &T,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.encode(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Sign claims without a password check.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Verify a token's signature and expiry and decode its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::Claims;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        let hasher = PasswordHasher::with_params(1024, 1, 1).unwrap();
        Authenticator::with_password_hasher(SECRET, hasher)
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("my_password").unwrap();

        let claims = Claims::for_user("user123", "waiter", 1);
        let result = authenticator
            .authenticate("my_password", &hash, &claims)
            .expect("Authentication failed");

        let decoded: Claims = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub, Some("user123".to_string()));
        assert_eq!(decoded.role(), Some("waiter".to_string()));
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("my_password").unwrap();

        let claims = Claims::for_user("user123", "waiter", 1);
        let result = authenticator.authenticate("wrong_password", &hash, &claims);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_corrupt_hash() {
        let authenticator = authenticator();

        let claims = Claims::for_user("user123", "waiter", 1);
        let result = authenticator.authenticate("my_password", "not-a-phc-string", &claims);
        assert!(matches!(result, Err(AuthenticationError::PasswordError(_))));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let other = Authenticator::new(b"another_secret_key_at_least_32_bytes");
        let token = other
            .generate_token(&Claims::for_user("user123", "admin", 1))
            .unwrap();

        let result = authenticator().validate_token::<Claims>(&token);
        assert!(matches!(result, Err(JwtError::InvalidSignature)));
    }
}
