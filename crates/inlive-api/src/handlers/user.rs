//! Profile handlers for the authenticated user.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;

use inlive_entity::user::{UpdateUser, User};

use crate::error::ApiResult;
use crate::extractors::{AuthUser, MultipartForm};
use crate::state::AppState;

/// GET /users/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<User>> {
    let user = state.user_service.current_user(auth.context()).await?;
    Ok(Json(user))
}

/// PUT /users/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateUser>,
) -> ApiResult<Json<User>> {
    let user = state
        .user_service
        .update_profile(auth.context(), req)
        .await?;
    Ok(Json(user))
}

/// PUT /users/me/photo (multipart, part `photo`)
pub async fn update_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<Json<User>> {
    let mut form = MultipartForm::read(multipart).await?;
    let photo = form.take_single_file("photo")?;

    let user = state.user_service.update_photo(auth.context(), photo).await?;
    Ok(Json(user))
}

/// DELETE /users/me/photo
pub async fn delete_photo(State(state): State<AppState>, auth: AuthUser) -> ApiResult<StatusCode> {
    state.user_service.delete_photo(auth.context()).await?;
    Ok(StatusCode::NO_CONTENT)
}
