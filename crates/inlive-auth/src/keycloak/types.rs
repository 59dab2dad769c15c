//! Wire types for the Keycloak REST API.

use serde::{Deserialize, Serialize};

/// Response of the OpenID Connect token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access-token lifetime in seconds.
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Error body returned by the token endpoints.
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl TokenErrorResponse {
    pub fn message(&self) -> String {
        self.error_description
            .clone()
            .unwrap_or_else(|| self.error.clone())
    }
}

/// Data needed to register a user in the realm.
#[derive(Debug, Clone)]
pub struct NewKeycloakUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

/// Keycloak `UserRepresentation` as accepted by `POST /users`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserRepresentation {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub enabled: bool,
    pub email_verified: bool,
    pub attributes: serde_json::Value,
    pub credentials: Vec<CredentialRepresentation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CredentialRepresentation {
    #[serde(rename = "type")]
    pub credential_type: String,
    pub value: String,
    pub temporary: bool,
}

/// Keycloak `RoleRepresentation` for client role mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RoleRepresentation {
    pub id: String,
    pub name: String,
}

/// Subset of Keycloak `ClientRepresentation` used for client lookup.
#[derive(Debug, Deserialize)]
pub(crate) struct ClientRepresentation {
    pub id: String,
    #[serde(rename = "clientId")]
    pub client_id: String,
}
