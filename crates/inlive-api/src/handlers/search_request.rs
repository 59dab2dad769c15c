//! Search request handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use inlive_core::types::pagination::PageResponse;
use inlive_entity::search_request::SearchRequest;
use inlive_service::services::{NewSearchRequest, SearchRequestDetails};

use crate::dto::request::UpdatePriceRequest;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /search-requests
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NewSearchRequest>,
) -> ApiResult<(StatusCode, Json<SearchRequest>)> {
    let request = state
        .search_request_service
        .create(auth.context(), req)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /search-requests/{id}
pub async fn details(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<SearchRequestDetails>> {
    Ok(Json(state.search_request_service.details(id).await?))
}

/// GET /search-requests/my
pub async fn my(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<SearchRequest>>> {
    let result = state
        .search_request_service
        .my_requests(auth.context(), &params.into_page_request())
        .await?;
    Ok(Json(result))
}

/// PATCH /search-requests/{id}/price
pub async fn update_price(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePriceRequest>,
) -> ApiResult<Json<SearchRequest>> {
    let request = state
        .search_request_service
        .update_price(auth.context(), id, req.price)
        .await?;
    Ok(Json(request))
}

/// PATCH /search-requests/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .search_request_service
        .cancel(auth.context(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
