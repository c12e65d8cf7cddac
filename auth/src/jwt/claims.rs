use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

const ROLE_CLAIM: &str = "role";

/// Bearer token payload.
///
/// Registered RFC 7519 claims are typed fields; anything service specific
/// (the staff role, for instance) is flattened from `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims issued at login: subject, role, `iat` now and `exp` after
    /// `expiration_hours`.
    pub fn for_user(user_id: impl ToString, role: impl ToString, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(expiration_hours);

        Self::new()
            .with_subject(user_id)
            .with_issued_at(now.timestamp())
            .with_expiration(expiration.timestamp())
            .with_extra(ROLE_CLAIM, role.to_string())
    }

    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Add a custom field. Values that fail to serialize are skipped.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Role carried in the `role` custom claim, if it is a string.
    pub fn role(&self) -> Option<String> {
        self.extra
            .get(ROLE_CLAIM)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user_sets_role_and_lifetime() {
        let claims = Claims::for_user("user123", "chef", 8);

        assert_eq!(claims.sub, Some("user123".to_string()));
        assert_eq!(claims.role(), Some("chef".to_string()));

        let exp = claims.exp.unwrap();
        let iat = claims.iat.unwrap();
        assert_eq!(exp - iat, 8 * 60 * 60);
    }

    #[test]
    fn test_role_serialized_as_top_level_claim() {
        let claims = Claims::for_user("user123", "admin", 1);
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["role"], "admin");
        assert_eq!(json["sub"], "user123");
        assert!(json.get("extra").is_none());
    }

    #[test]
    fn test_role_missing_or_not_a_string() {
        assert_eq!(Claims::new().role(), None);
        assert_eq!(Claims::new().with_extra("role", 7).role(), None);
    }
}
