use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

/// Identity carried by a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityClaims {
    pub subject_id: UserId,
    pub role: Role,
}

impl IdentityClaims {
    pub fn new(subject_id: UserId, role: Role) -> Self {
        Self { subject_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Per-request authentication slot.
///
/// Empty for anonymous requests. Only the resolver fills it, and only with
/// claims from a token that verified and whose subject exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthContext {
    claims: Option<IdentityClaims>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { claims: None }
    }

    pub fn authenticated(claims: IdentityClaims) -> Self {
        Self {
            claims: Some(claims),
        }
    }

    pub fn claims(&self) -> Option<&IdentityClaims> {
        self.claims.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.claims.is_some()
    }
}

/// `<scheme> <token>` as sent in an `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BearerCredential<'a> {
    pub scheme: &'a str,
    pub token: &'a str,
}

impl<'a> BearerCredential<'a> {
    /// Split on the first run of whitespace. A header with no separator is all
    /// scheme and an empty token.
    pub fn parse(header: &'a str) -> Self {
        let header = header.trim();
        match header.split_once(|c: char| c.is_ascii_whitespace()) {
            Some((scheme, token)) => Self {
                scheme,
                token: token.trim_start(),
            },
            None => Self {
                scheme: header,
                token: "",
            },
        }
    }

    pub fn is_bearer(&self) -> bool {
        self.scheme.eq_ignore_ascii_case("bearer")
    }
}
