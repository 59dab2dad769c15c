//! Auth handlers — login, registration, refresh, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{AuthResponse, MessageResponse};
use crate::dto::validate_payload;
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    validate_payload(&req)?;

    let tokens = state.auth_service.login(&req.username, &req.password).await?;
    Ok(Json(tokens.into()))
}

/// POST /auth/client/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    validate_payload(&req)?;

    let tokens = state.auth_service.register_client(req.into()).await?;
    Ok((StatusCode::CREATED, Json(tokens.into())))
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<AuthResponse>> {
    validate_payload(&req)?;

    let tokens = state.auth_service.refresh(&req.refresh_token).await?;
    Ok(Json(tokens.into()))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<MessageResponse>> {
    validate_payload(&req)?;

    state.auth_service.logout(&req.refresh_token).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}
