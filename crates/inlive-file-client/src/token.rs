//! Service-account bearer token for outbound file-manager calls.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use inlive_auth::KeycloakClient;
use inlive_core::config::KeycloakConfig;
use inlive_core::AppResult;

/// Tokens are considered expired this many seconds before their actual
/// expiry, so a request never goes out with a token about to lapse mid-flight.
const EXPIRY_MARGIN_SECS: i64 = 30;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Provides a cached service-account access token, re-authenticating with
/// the password grant when the cached token is absent or near expiry.
#[derive(Clone)]
pub struct ServiceTokenProvider {
    keycloak: KeycloakClient,
    username: String,
    password: String,
    token: Arc<RwLock<Option<CachedToken>>>,
}

impl ServiceTokenProvider {
    pub fn new(config: KeycloakConfig) -> AppResult<Self> {
        let username = config.admin_username.clone();
        let password = config.admin_password.clone();
        Ok(Self {
            keycloak: KeycloakClient::new(config)?,
            username,
            password,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Return a valid access token for the service account.
    pub async fn access_token(&self) -> AppResult<String> {
        let now = Utc::now();
        if let Some(cached) = self.token.read().await.as_ref() {
            if cached.expires_at > now {
                return Ok(cached.access_token.clone());
            }
        }

        let mut guard = self.token.write().await;
        if let Some(cached) = guard.as_ref() {
            if cached.expires_at > now {
                return Ok(cached.access_token.clone());
            }
        }

        let response = self.keycloak.login(&self.username, &self.password).await?;
        debug!(expires_in = response.expires_in, "service-account token refreshed");
        let cached = CachedToken {
            access_token: response.access_token.clone(),
            expires_at: now + Duration::seconds(response.expires_in - EXPIRY_MARGIN_SECS),
        };
        *guard = Some(cached);
        Ok(response.access_token)
    }
}
