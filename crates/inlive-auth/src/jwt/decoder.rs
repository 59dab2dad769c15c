//! Access-token validation against the realm's published signing keys.

use std::collections::HashMap;
use std::sync::Arc;

use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use inlive_core::config::KeycloakConfig;
use inlive_core::{AppError, AppResult};

use super::claims::Claims;

/// Validates bearer tokens issued by the Keycloak realm.
///
/// Signing keys are fetched from the realm JWKS endpoint and cached by key ID.
/// A token carrying an unknown `kid` triggers one refetch, which covers key
/// rotation without restarting the service.
#[derive(Clone)]
pub struct TokenDecoder {
    config: KeycloakConfig,
    http: reqwest::Client,
    keys: Arc<RwLock<HashMap<String, DecodingKey>>>,
}

impl TokenDecoder {
    pub fn new(config: KeycloakConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            keys: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Validate a bearer token and return its claims.
    pub async fn decode(&self, token: &str) -> AppResult<Claims> {
        let header = decode_header(token)
            .map_err(|e| AppError::unauthorized(format!("Invalid token header: {e}")))?;
        let kid = header
            .kid
            .ok_or_else(|| AppError::unauthorized("Token has no key ID"))?;

        let key = match self.cached_key(&kid).await {
            Some(key) => key,
            None => {
                debug!(kid = %kid, "signing key not cached, refreshing JWKS");
                self.refresh_keys().await?;
                self.cached_key(&kid).await.ok_or_else(|| {
                    warn!(kid = %kid, "token signed with a key the realm does not publish");
                    AppError::unauthorized("Token signed with an unknown key")
                })?
            }
        };

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[self.config.issuer()]);
        validation.leeway = self.config.leeway_seconds;

        let data = decode::<Claims>(token, &key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::unauthorized("Token has expired"),
                ErrorKind::InvalidToken => AppError::unauthorized("Invalid token format"),
                ErrorKind::InvalidSignature => AppError::unauthorized("Invalid token signature"),
                ErrorKind::InvalidIssuer => AppError::unauthorized("Token issued by another realm"),
                _ => AppError::unauthorized(format!("Token validation failed: {e}")),
            }
        })?;

        Ok(data.claims)
    }

    async fn cached_key(&self, kid: &str) -> Option<DecodingKey> {
        self.keys.read().await.get(kid).cloned()
    }

    /// Fetch the realm JWKS and replace the key cache with it.
    async fn refresh_keys(&self) -> AppResult<()> {
        let url = self.config.jwks_url();
        let response = self.http.get(&url).send().await.map_err(|e| {
            AppError::with_source(
                inlive_core::error::ErrorKind::ExternalService,
                "Failed to reach the identity provider",
                e,
            )
        })?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "JWKS endpoint returned {}",
                response.status()
            )));
        }

        let jwks: JwkSet = response.json().await.map_err(|e| {
            AppError::with_source(
                inlive_core::error::ErrorKind::ExternalService,
                "Identity provider returned malformed JWKS",
                e,
            )
        })?;

        let mut fresh = HashMap::new();
        for jwk in &jwks.keys {
            let Some(kid) = jwk.common.key_id.clone() else {
                continue;
            };
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    fresh.insert(kid, key);
                }
                Err(e) => warn!(kid = %kid, error = %e, "skipping unusable JWKS entry"),
            }
        }

        if fresh.is_empty() {
            return Err(AppError::external_service(
                "Identity provider published no usable signing keys",
            ));
        }

        debug!(count = fresh.len(), "JWKS cache refreshed");
        *self.keys.write().await = fresh;
        Ok(())
    }
}
