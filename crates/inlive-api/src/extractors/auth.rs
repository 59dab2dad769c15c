//! `AuthUser` extractor — validates the bearer token and resolves the
//! caller's local profile.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use inlive_core::error::AppError;
use inlive_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthorized("Missing or malformed Authorization header"))?;

        let claims = state.decoder.decode(bearer.token()).await?;
        let roles = claims.marketplace_roles(&state.config.keycloak.client_id);

        let user = state
            .users
            .find_by_keycloak_id(&claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("No profile exists for this account"))?;

        Ok(AuthUser(RequestContext::new(user.id, claims.sub, roles)))
    }
}
