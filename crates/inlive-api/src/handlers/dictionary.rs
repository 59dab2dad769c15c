//! Dictionary (reference data) handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use inlive_core::types::pagination::{PageRequest, PageResponse};
use inlive_entity::dictionary::{CreateDictionary, Dictionary, UpdateDictionary};

use crate::dto::request::DictionarySearchParams;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /dictionaries
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<DictionarySearchParams>,
) -> ApiResult<Json<Vec<Dictionary>>> {
    Ok(Json(state.dictionary_service.list(params.key).await?))
}

/// GET /dictionaries/search
pub async fn search(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<DictionarySearchParams>,
) -> ApiResult<Json<PageResponse<Dictionary>>> {
    let page = PageRequest::new(params.page.unwrap_or(1), params.page_size.unwrap_or(20));
    let result = state
        .dictionary_service
        .search(params.key, params.value.as_deref(), &page)
        .await?;
    Ok(Json(result))
}

/// GET /dictionaries/{id}
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Dictionary>> {
    Ok(Json(state.dictionary_service.get(id).await?))
}

/// POST /dictionaries (admin)
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateDictionary>,
) -> ApiResult<(StatusCode, Json<Dictionary>)> {
    let entry = state.dictionary_service.create(auth.context(), req).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /dictionaries/{id} (admin)
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateDictionary>,
) -> ApiResult<Json<Dictionary>> {
    let entry = state
        .dictionary_service
        .update(auth.context(), id, req)
        .await?;
    Ok(Json(entry))
}

/// DELETE /dictionaries/{id} (admin)
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.dictionary_service.delete(auth.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
