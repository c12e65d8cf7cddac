//! Access checks over a resolved [`AuthContext`].
//!
//! Every guard is a pure function: no I/O, no token re-verification. An empty
//! context always fails with `Unauthenticated`, never `Forbidden`.

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthContext;
use crate::domain::auth::models::IdentityClaims;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

pub fn require_authenticated(context: &AuthContext) -> Result<&IdentityClaims, AuthError> {
    context
        .claims()
        .ok_or_else(AuthError::authentication_required)
}

pub fn require_role(context: &AuthContext, expected: Role) -> Result<&IdentityClaims, AuthError> {
    require_any_role(context, &[expected])
}

pub fn require_any_role<'a>(
    context: &'a AuthContext,
    allowed: &[Role],
) -> Result<&'a IdentityClaims, AuthError> {
    let claims = require_authenticated(context)?;
    if allowed.contains(&claims.role) {
        Ok(claims)
    } else {
        Err(AuthError::insufficient_privileges())
    }
}

pub fn require_admin(context: &AuthContext) -> Result<&IdentityClaims, AuthError> {
    require_role(context, Role::Admin)
}

/// Passes for the owner of a resource and for admins.
pub fn require_owner_or_admin<'a>(
    context: &'a AuthContext,
    owner: &UserId,
) -> Result<&'a IdentityClaims, AuthError> {
    let claims = require_authenticated(context)?;
    if is_owner_or_admin(claims, owner) {
        Ok(claims)
    } else {
        Err(AuthError::insufficient_privileges())
    }
}

pub fn is_owner_or_admin(claims: &IdentityClaims, owner: &UserId) -> bool {
    claims.is_admin() || claims.subject_id == *owner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(role: Role) -> (UserId, AuthContext) {
        let id = UserId::new();
        (id, AuthContext::authenticated(IdentityClaims::new(id, role)))
    }

    #[test]
    fn test_anonymous_context_is_unauthenticated_for_every_guard() {
        let anonymous = AuthContext::anonymous();
        let owner = UserId::new();

        assert_eq!(
            require_authenticated(&anonymous),
            Err(AuthError::authentication_required())
        );
        assert_eq!(
            require_admin(&anonymous),
            Err(AuthError::authentication_required())
        );
        assert_eq!(
            require_any_role(&anonymous, &Role::ALL),
            Err(AuthError::authentication_required())
        );
        assert_eq!(
            require_owner_or_admin(&anonymous, &owner),
            Err(AuthError::authentication_required())
        );
    }

    #[test]
    fn test_require_role_passes_only_for_expected_role() {
        for expected in Role::ALL {
            for actual in Role::ALL {
                let (_, ctx) = context(actual);
                let result = require_role(&ctx, expected);
                if actual == expected {
                    assert!(result.is_ok());
                } else {
                    assert_eq!(result, Err(AuthError::insufficient_privileges()));
                }
            }
        }
    }

    #[test]
    fn test_require_any_role() {
        let (_, chef) = context(Role::Chef);
        assert!(require_any_role(&chef, &[Role::Chef, Role::Waiter]).is_ok());
        assert!(require_any_role(&chef, &[Role::Admin]).is_err());
        assert!(require_any_role(&chef, &[]).is_err());
    }

    #[test]
    fn test_ownership_holds_for_owner_or_admin_only() {
        for role in Role::ALL {
            let (subject, ctx) = context(role);
            let other = UserId::new();
            let claims = ctx.claims().copied().unwrap();

            assert!(is_owner_or_admin(&claims, &subject));
            assert!(require_owner_or_admin(&ctx, &subject).is_ok());

            assert_eq!(is_owner_or_admin(&claims, &other), role == Role::Admin);
            assert_eq!(
                require_owner_or_admin(&ctx, &other).is_ok(),
                role == Role::Admin
            );
        }
    }

    #[test]
    fn test_waiter_scenario() {
        let (_, waiter) = context(Role::Waiter);

        assert!(require_authenticated(&waiter).is_ok());
        assert_eq!(
            require_admin(&waiter),
            Err(AuthError::insufficient_privileges())
        );
    }

    #[test]
    fn test_guards_compose_in_any_order() {
        let (id, admin) = context(Role::Admin);

        let first = require_admin(&admin).and_then(|_| require_owner_or_admin(&admin, &id));
        let second = require_owner_or_admin(&admin, &id).and_then(|_| require_admin(&admin));
        assert_eq!(first, second);
    }
}
