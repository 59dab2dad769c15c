//! Price offer handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use inlive_core::types::pagination::PageResponse;
use inlive_entity::price_request::PriceRequest;

use crate::dto::request::{CreatePriceOfferRequest, RespondToOfferRequest, UpdatePriceRequest};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /price-requests
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePriceOfferRequest>,
) -> ApiResult<(StatusCode, Json<PriceRequest>)> {
    let offer = state
        .price_request_service
        .create(auth.context(), req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(offer)))
}

/// GET /price-requests/{id}
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<PriceRequest>> {
    Ok(Json(state.price_request_service.get(id).await?))
}

/// PUT /price-requests/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePriceRequest>,
) -> ApiResult<Json<PriceRequest>> {
    let offer = state
        .price_request_service
        .update(auth.context(), id, req.price)
        .await?;
    Ok(Json(offer))
}

/// DELETE /price-requests/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.price_request_service.delete(auth.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /price-requests/by-unit/{unit_id}
pub async fn by_unit(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(unit_id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<PriceRequest>>> {
    let result = state
        .price_request_service
        .by_unit(unit_id, &params.into_page_request())
        .await?;
    Ok(Json(result))
}

/// GET /price-requests/by-search-request/{search_request_id}
pub async fn by_search_request(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(search_request_id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<PriceRequest>>> {
    let result = state
        .price_request_service
        .by_search_request(search_request_id, &params.into_page_request())
        .await?;
    Ok(Json(result))
}

/// PATCH /price-requests/{id}/respond
pub async fn respond(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<RespondToOfferRequest>,
) -> ApiResult<Json<PriceRequest>> {
    let offer = state
        .price_request_service
        .respond(auth.context(), id, req.response)
        .await?;
    Ok(Json(offer))
}
