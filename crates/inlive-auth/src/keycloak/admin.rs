//! Realm admin API client for user lifecycle management.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use inlive_core::config::KeycloakConfig;
use inlive_core::error::ErrorKind;
use inlive_core::{AppError, AppResult};

use crate::roles::KeycloakRole;

use super::types::{
    ClientRepresentation, CredentialRepresentation, NewKeycloakUser, RoleRepresentation,
    TokenResponse, UserRepresentation,
};

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Admin tokens are refreshed this many seconds before they expire.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 30;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - chrono::Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) > now
    }
}

/// Client for the realm admin REST API.
///
/// Authenticates as the configured service account and caches the admin
/// access token until shortly before expiry.
#[derive(Clone)]
pub struct KeycloakAdminClient {
    config: KeycloakConfig,
    http: reqwest::Client,
    token: Arc<RwLock<Option<CachedToken>>>,
}

impl KeycloakAdminClient {
    pub fn new(config: KeycloakConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build the identity-provider HTTP client",
                    e,
                )
            })?;
        Ok(Self {
            config,
            http,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Create a realm user and assign the given client role.
    ///
    /// Returns the Keycloak user ID. Registration as `ADMIN` is rejected
    /// before any request is made.
    pub async fn register_user(
        &self,
        user: &NewKeycloakUser,
        role: KeycloakRole,
    ) -> AppResult<String> {
        if role == KeycloakRole::Admin {
            return Err(AppError::forbidden(
                "Self-registration with the ADMIN role is not allowed",
            ));
        }

        let token = self.admin_token().await?;
        let representation = UserRepresentation {
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            enabled: true,
            email_verified: false,
            attributes: serde_json::json!({ "phoneNumber": [user.phone_number] }),
            credentials: vec![CredentialRepresentation {
                credential_type: "password".to_string(),
                value: user.password.clone(),
                temporary: false,
            }],
        };

        let response = self
            .http
            .post(format!("{}/users", self.config.admin_url()))
            .bearer_auth(&token)
            .json(&representation)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Failed to reach the identity provider",
                    e,
                )
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::CONFLICT {
            return Err(AppError::conflict(
                "A user with this username or email already exists",
            ));
        }
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "User creation failed: identity provider returned {status}"
            )));
        }

        // The new user's ID is the last segment of the Location header.
        let keycloak_id = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|loc| loc.rsplit('/').next())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::external_service("Identity provider did not return the new user's ID")
            })?;

        self.assign_client_role(&token, &keycloak_id, role).await?;

        info!(keycloak_id = %keycloak_id, role = %role, "registered realm user");
        Ok(keycloak_id)
    }

    /// Delete a realm user.
    pub async fn delete_user(&self, keycloak_id: &str) -> AppResult<()> {
        let token = self.admin_token().await?;
        let response = self
            .http
            .delete(format!("{}/users/{}", self.config.admin_url(), keycloak_id))
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Failed to reach the identity provider",
                    e,
                )
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found("User not found at the identity provider"));
        }
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "User deletion failed: identity provider returned {status}"
            )));
        }

        info!(keycloak_id = %keycloak_id, "deleted realm user");
        Ok(())
    }

    async fn assign_client_role(
        &self,
        token: &str,
        keycloak_id: &str,
        role: KeycloakRole,
    ) -> AppResult<()> {
        let client = self.lookup_client(token).await?;
        let role_rep: RoleRepresentation = self
            .admin_get(
                token,
                &format!(
                    "{}/clients/{}/roles/{}",
                    self.config.admin_url(),
                    client.id,
                    role.as_str()
                ),
            )
            .await?;

        let response = self
            .http
            .post(format!(
                "{}/users/{}/role-mappings/clients/{}",
                self.config.admin_url(),
                keycloak_id,
                client.id
            ))
            .bearer_auth(token)
            .json(&vec![role_rep])
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Failed to reach the identity provider",
                    e,
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Role assignment failed: identity provider returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn lookup_client(&self, token: &str) -> AppResult<ClientRepresentation> {
        let clients: Vec<ClientRepresentation> = self
            .admin_get(
                token,
                &format!(
                    "{}/clients?clientId={}",
                    self.config.admin_url(),
                    self.config.client_id
                ),
            )
            .await?;
        clients
            .into_iter()
            .find(|c| c.client_id == self.config.client_id)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "Client '{}' is not registered in the realm",
                    self.config.client_id
                ))
            })
    }

    async fn admin_get<T: serde::de::DeserializeOwned>(
        &self,
        token: &str,
        url: &str,
    ) -> AppResult<T> {
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Failed to reach the identity provider",
                    e,
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Admin API request failed: identity provider returned {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Identity provider returned a malformed admin API response",
                e,
            )
        })
    }

    /// Return a valid admin access token, requesting a new one when the
    /// cached token is absent or about to expire.
    async fn admin_token(&self) -> AppResult<String> {
        let now = Utc::now();
        if let Some(cached) = self.token.read().await.as_ref() {
            if cached.is_fresh(now) {
                return Ok(cached.access_token.clone());
            }
        }

        let mut guard = self.token.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(cached) = guard.as_ref() {
            if cached.is_fresh(now) {
                return Ok(cached.access_token.clone());
            }
        }

        let mut form = vec![
            ("grant_type", "password"),
            ("client_id", self.config.client_id.as_str()),
            ("username", self.config.admin_username.as_str()),
            ("password", self.config.admin_password.as_str()),
        ];
        if !self.config.client_secret.is_empty() {
            form.push(("client_secret", self.config.client_secret.as_str()));
        }

        let response = self
            .http
            .post(self.config.token_url())
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Failed to reach the identity provider",
                    e,
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Service-account login failed: identity provider returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Identity provider returned a malformed token response",
                e,
            )
        })?;

        debug!(expires_in = token.expires_in, "admin token refreshed");
        let cached = CachedToken {
            access_token: token.access_token.clone(),
            expires_at: now + chrono::Duration::seconds(token.expires_in),
        };
        *guard = Some(cached);
        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_token_freshness_margin() {
        let now = Utc::now();
        let fresh = CachedToken {
            access_token: "t".to_string(),
            expires_at: now + chrono::Duration::seconds(120),
        };
        let stale = CachedToken {
            access_token: "t".to_string(),
            expires_at: now + chrono::Duration::seconds(TOKEN_REFRESH_MARGIN_SECS - 1),
        };
        assert!(fresh.is_fresh(now));
        assert!(!stale.is_fresh(now));
    }
}
