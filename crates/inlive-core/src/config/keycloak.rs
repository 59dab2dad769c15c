//! Keycloak identity-provider configuration.

use serde::{Deserialize, Serialize};

/// Keycloak realm and client configuration.
///
/// The backend is an OAuth2 resource server: inbound tokens are validated
/// against the realm's published JWKS. The admin credentials belong to a
/// service account used for user management (registration, deletion).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeycloakConfig {
    /// Base URL of the Keycloak server, e.g. `http://localhost:8180`.
    pub base_url: String,
    /// Realm name.
    pub realm: String,
    /// Client ID registered for this backend.
    pub client_id: String,
    /// Client secret (empty for public clients).
    #[serde(default)]
    pub client_secret: String,
    /// Service-account username for admin operations.
    pub admin_username: String,
    /// Service-account password for admin operations.
    pub admin_password: String,
    /// Accepted clock skew when validating token expiry, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

impl KeycloakConfig {
    /// URL of the realm's OpenID Connect token endpoint.
    pub fn token_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.base_url, self.realm
        )
    }

    /// URL of the realm's OpenID Connect logout endpoint.
    pub fn logout_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/logout",
            self.base_url, self.realm
        )
    }

    /// URL of the realm's published JSON Web Key Set.
    pub fn jwks_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/certs",
            self.base_url, self.realm
        )
    }

    /// Expected `iss` claim value for tokens issued by this realm.
    pub fn issuer(&self) -> String {
        format!("{}/realms/{}", self.base_url, self.realm)
    }

    /// Base URL of the realm's admin REST API.
    pub fn admin_url(&self) -> String {
        format!("{}/admin/realms/{}", self.base_url, self.realm)
    }
}

fn default_leeway() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KeycloakConfig {
        KeycloakConfig {
            base_url: "http://localhost:8180".to_string(),
            realm: "inlive".to_string(),
            client_id: "inlive-backend".to_string(),
            client_secret: String::new(),
            admin_username: "svc".to_string(),
            admin_password: "secret".to_string(),
            leeway_seconds: 5,
        }
    }

    #[test]
    fn test_endpoint_urls() {
        let cfg = sample();
        assert_eq!(
            cfg.token_url(),
            "http://localhost:8180/realms/inlive/protocol/openid-connect/token"
        );
        assert_eq!(
            cfg.jwks_url(),
            "http://localhost:8180/realms/inlive/protocol/openid-connect/certs"
        );
        assert_eq!(cfg.issuer(), "http://localhost:8180/realms/inlive");
        assert_eq!(
            cfg.admin_url(),
            "http://localhost:8180/admin/realms/inlive"
        );
    }
}
