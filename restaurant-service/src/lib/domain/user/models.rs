use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::RoleError;
use crate::domain::user::errors::UserIdError;

/// Staff member account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub role: Role,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type, the unique login field of a user.
///
/// Validated with an RFC 5322 parser and stored lowercased so uniqueness
/// checks are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Staff role. The set is closed: anything else is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Chef,
    Waiter,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Chef, Role::Waiter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Chef => "chef",
            Role::Waiter => "waiter",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "chef" => Ok(Role::Chef),
            "waiter" => Ok(Role::Waiter),
            other => Err(RoleError::Invalid(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles that may be assigned through write requests.
///
/// Built from configuration at startup and handed to whoever validates
/// request bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut set = Vec::new();
        for role in roles {
            if !set.contains(&role) {
                set.push(role);
            }
        }
        Self(set)
    }

    pub fn all() -> Self {
        Self::new(Role::ALL)
    }

    /// # Errors
    /// * `Invalid` - A name is not one of the known roles
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, RoleError> {
        names
            .iter()
            .map(|name| name.as_ref().parse::<Role>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Parse a role from a request body and check it is assignable.
    ///
    /// # Errors
    /// * `Invalid` - Unknown role, or a known role outside this set
    pub fn parse(&self, raw: &str) -> Result<Role, RoleError> {
        let role = raw.parse::<Role>()?;
        if self.contains(role) {
            Ok(role)
        } else {
            Err(RoleError::Invalid(raw.to_string()))
        }
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self::all()
    }
}

/// How a `/users/:uid` path segment addresses a user: by id or by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Id(UserId),
    Email(String),
}

impl UserLookup {
    /// UUID-shaped segments are ids, everything else is treated as an email.
    pub fn parse(raw: &str) -> Self {
        match UserId::from_string(raw) {
            Ok(id) => UserLookup::Id(id),
            Err(_) => UserLookup::Email(raw.trim().to_lowercase()),
        }
    }
}

impl fmt::Display for UserLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserLookup::Id(id) => id.fmt(f),
            UserLookup::Email(email) => email.fmt(f),
        }
    }
}

/// One page of a listing. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(number: u32, limit: u32) -> Self {
        Self {
            number: number.max(1),
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub email: EmailAddress,
    pub password: String,
    pub role: Role,
}

impl CreateUserCommand {
    pub fn new(email: EmailAddress, password: String, role: Role) -> Self {
        Self {
            email,
            password,
            role,
        }
    }
}

/// Partial update of a user. Only provided fields change.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub email: Option<EmailAddress>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert_eq!(
            "Admin".parse::<Role>(),
            Err(RoleError::Invalid("Admin".to_string()))
        );
        assert!("user".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_set_parse_rejects_unassignable_role() {
        let roles = RoleSet::new([Role::Chef, Role::Waiter]);

        assert_eq!(roles.parse("chef"), Ok(Role::Chef));
        assert_eq!(
            roles.parse("admin"),
            Err(RoleError::Invalid("admin".to_string()))
        );
        assert_eq!(
            roles.parse("cook"),
            Err(RoleError::Invalid("cook".to_string()))
        );
    }

    #[test]
    fn test_role_set_from_names() {
        let roles = RoleSet::from_names(&["waiter", "chef", "waiter"]).unwrap();
        assert_eq!(roles, RoleSet::new([Role::Waiter, Role::Chef]));

        assert!(RoleSet::from_names(&["waiter", "manager"]).is_err());
        assert_eq!(RoleSet::default(), RoleSet::all());
    }

    #[test]
    fn test_email_is_normalized() {
        let email = EmailAddress::new("  Waiter@Example.COM ".to_string()).unwrap();
        assert_eq!(email.as_str(), "waiter@example.com");

        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new(String::new()).is_err());
    }

    #[test]
    fn test_user_lookup_parse() {
        let id = UserId::new();
        assert_eq!(UserLookup::parse(&id.to_string()), UserLookup::Id(id));
        assert_eq!(
            UserLookup::parse("Chef@Example.com"),
            UserLookup::Email("chef@example.com".to_string())
        );
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(Page::new(0, 0), Page::new(1, 1));
        assert_eq!(Page::new(3, 500).limit, Page::MAX_LIMIT);
        assert_eq!(Page::new(3, 10).offset(), 20);
        assert_eq!(Page::default().offset(), 0);
    }
}
