//! Claims carried in Keycloak-issued access tokens.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::roles::KeycloakRole;

/// Claims payload of a Keycloak access token.
///
/// Client roles live under `resource_access.<client_id>.roles`; realm-level
/// roles are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the Keycloak user ID.
    pub sub: String,
    /// Token issuer (realm URL).
    pub iss: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Login name.
    #[serde(default)]
    pub preferred_username: Option<String>,
    /// Full display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Custom user identifier claim, when mapped into the token.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Per-client role assignments.
    #[serde(default)]
    pub resource_access: HashMap<String, ClientAccess>,
}

/// Role list for one client inside `resource_access`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientAccess {
    /// Role names granted for the client.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Claims {
    /// Role names granted for the given client, empty when absent.
    pub fn client_roles(&self, client_id: &str) -> Vec<String> {
        self.resource_access
            .get(client_id)
            .map(|access| access.roles.clone())
            .unwrap_or_default()
    }

    /// Recognized marketplace roles granted for the given client.
    pub fn marketplace_roles(&self, client_id: &str) -> Vec<KeycloakRole> {
        self.client_roles(client_id)
            .iter()
            .filter_map(|role| role.parse().ok())
            .collect()
    }

    /// Whether the token grants the given role for the client.
    pub fn has_role(&self, client_id: &str, role: KeycloakRole) -> bool {
        self.marketplace_roles(client_id).contains(&role)
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with_roles(roles: &[&str]) -> Claims {
        let mut resource_access = HashMap::new();
        resource_access.insert(
            "inlive-backend".to_string(),
            ClientAccess {
                roles: roles.iter().map(|r| r.to_string()).collect(),
            },
        );
        Claims {
            sub: "4f6c7e0a".to_string(),
            iss: "http://localhost:8180/realms/inlive".to_string(),
            exp: 4_102_444_800,
            iat: 0,
            preferred_username: Some("user@example.com".to_string()),
            name: Some("Test User".to_string()),
            user_id: None,
            resource_access,
        }
    }

    #[test]
    fn test_client_role_extraction() {
        let claims = claims_with_roles(&["CLIENT", "offline_access"]);
        assert!(claims.has_role("inlive-backend", KeycloakRole::Client));
        assert!(!claims.has_role("inlive-backend", KeycloakRole::Admin));
        // unknown role names are skipped, not errors
        assert_eq!(claims.marketplace_roles("inlive-backend").len(), 1);
    }

    #[test]
    fn test_missing_client_yields_no_roles() {
        let claims = claims_with_roles(&["ADMIN"]);
        assert!(claims.client_roles("other-client").is_empty());
        assert!(!claims.has_role("other-client", KeycloakRole::Admin));
    }
}
