//! OpenID Connect token-endpoint client.

use std::time::Duration;

use tracing::debug;

use inlive_core::config::KeycloakConfig;
use inlive_core::error::ErrorKind;
use inlive_core::{AppError, AppResult};

use super::types::{TokenErrorResponse, TokenResponse};

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the realm's token and logout endpoints.
#[derive(Clone)]
pub struct KeycloakClient {
    config: KeycloakConfig,
    http: reqwest::Client,
}

impl KeycloakClient {
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
        Ok(Self { config, http })
    }

    /// Exchange user credentials for a token pair (password grant).
    pub async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse> {
        let mut form = vec![
            ("grant_type", "password"),
            ("client_id", self.config.client_id.as_str()),
            ("username", username),
            ("password", password),
        ];
        if !self.config.client_secret.is_empty() {
            form.push(("client_secret", self.config.client_secret.as_str()));
        }
        self.request_token(&form, "Invalid username or password")
            .await
    }

    /// Exchange a refresh token for a fresh token pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenResponse> {
        let mut form = vec![
            ("grant_type", "refresh_token"),
            ("client_id", self.config.client_id.as_str()),
            ("refresh_token", refresh_token),
        ];
        if !self.config.client_secret.is_empty() {
            form.push(("client_secret", self.config.client_secret.as_str()));
        }
        self.request_token(&form, "Refresh token is invalid or expired")
            .await
    }

    /// Invalidate a refresh token, ending the session.
    pub async fn logout(&self, refresh_token: &str) -> AppResult<()> {
        let mut form = vec![
            ("client_id", self.config.client_id.as_str()),
            ("refresh_token", refresh_token),
        ];
        if !self.config.client_secret.is_empty() {
            form.push(("client_secret", self.config.client_secret.as_str()));
        }

        let response = self
            .http
            .post(self.config.logout_url())
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

        let status = response.status();
        if status.is_success() {
            debug!("session ended at the identity provider");
            return Ok(());
        }
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Err(AppError::unauthorized("Refresh token is invalid or expired"));
        }
        Err(AppError::external_service(format!(
            "Logout failed: identity provider returned {status}"
        )))
    }

    async fn request_token(
        &self,
        form: &[(&str, &str)],
        denied_message: &str,
    ) -> AppResult<TokenResponse> {
        let response = self
            .http
            .post(self.config.token_url())
            .form(form)
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
        if status.is_success() {
            return response.json().await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Identity provider returned a malformed token response",
                    e,
                )
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::BAD_REQUEST
        {
            let detail = response
                .json::<TokenErrorResponse>()
                .await
                .map(|e| e.message())
                .unwrap_or_else(|_| denied_message.to_string());
            debug!(detail = %detail, "token request denied");
            return Err(AppError::unauthorized(denied_message));
        }

        Err(AppError::external_service(format!(
            "Token request failed: identity provider returned {status}"
        )))
    }
}
