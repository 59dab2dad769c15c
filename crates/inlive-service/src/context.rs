//! Identity of the authenticated caller, resolved once per request.

use inlive_auth::KeycloakRole;
use inlive_core::{AppError, AppResult};

/// The authenticated caller as seen by the service layer.
///
/// Built by the API layer from a validated token plus the matching local
/// user row, so services can check ownership by plain ID comparison.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Local user ID.
    pub user_id: i64,
    /// Keycloak subject identifier.
    pub keycloak_id: String,
    /// Roles granted for this backend's client.
    pub roles: Vec<KeycloakRole>,
}

impl RequestContext {
    pub fn new(user_id: i64, keycloak_id: impl Into<String>, roles: Vec<KeycloakRole>) -> Self {
        Self {
            user_id,
            keycloak_id: keycloak_id.into(),
            roles,
        }
    }

    /// Whether the caller holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&KeycloakRole::Admin)
    }

    /// Fail with a forbidden error unless the caller is an admin.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Administrator role required"))
        }
    }

    /// Fail with a forbidden error unless the caller owns the resource
    /// or is an admin.
    pub fn require_owner(&self, owner_id: i64) -> AppResult<()> {
        if self.user_id == owner_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "You do not have access to this resource",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_checks() {
        let admin = RequestContext::new(1, "kc-1", vec![KeycloakRole::Admin]);
        let client = RequestContext::new(2, "kc-2", vec![KeycloakRole::Client]);

        assert!(admin.require_admin().is_ok());
        assert!(client.require_admin().is_err());
    }

    #[test]
    fn test_ownership_checks() {
        let client = RequestContext::new(2, "kc-2", vec![KeycloakRole::Client]);
        assert!(client.require_owner(2).is_ok());
        assert!(client.require_owner(3).is_err());

        // admins act on any resource
        let admin = RequestContext::new(1, "kc-1", vec![KeycloakRole::Admin]);
        assert!(admin.require_owner(3).is_ok());
    }
}
