//! Accommodation unit handlers.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;

use inlive_core::types::pagination::PageResponse;
use inlive_entity::price_request::PriceRequest;
use inlive_entity::reservation::Reservation;
use inlive_entity::search_request::SearchRequest;
use inlive_entity::unit::{AccommodationUnit, UnitTariff, UpdateUnit};
use inlive_service::services::UnitDetails;

use crate::dto::request::{
    AddTariffRequest, CreateUnitRequest, UnitSearchParams, UpdateUnitDictionariesRequest,
};
use crate::dto::validate_payload;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, MultipartForm, PaginationParams};
use crate::state::AppState;

/// POST /accommodation-units (multipart: `data`, `photos`)
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<AccommodationUnit>)> {
    let mut form = MultipartForm::read(multipart).await?;
    let req: CreateUnitRequest = form.json_field("data")?;
    validate_payload(&req)?;

    let photos = form.take_files("photos");

    let unit = state
        .unit_service
        .create(auth.context(), req.into(), photos)
        .await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

/// GET /accommodation-units/{id}
pub async fn details(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<UnitDetails>> {
    Ok(Json(state.unit_service.details(id).await?))
}

/// GET /accommodation-units/search
pub async fn search(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<UnitSearchParams>,
) -> ApiResult<Json<PageResponse<AccommodationUnit>>> {
    let page = PaginationParams {
        page: params.page.unwrap_or(1),
        page_size: params.page_size.unwrap_or(20),
    }
    .into_page_request();

    Ok(Json(state.unit_service.search(&params.filter(), &page).await?))
}

/// PUT /accommodation-units/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUnit>,
) -> ApiResult<Json<AccommodationUnit>> {
    Ok(Json(state.unit_service.update(auth.context(), id, req).await?))
}

/// DELETE /accommodation-units/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.unit_service.delete(auth.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /accommodation-units/{id}/dictionaries
pub async fn update_dictionaries(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUnitDictionariesRequest>,
) -> ApiResult<StatusCode> {
    state
        .unit_service
        .update_dictionaries(auth.context(), id, req.dictionary_ids)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /accommodation-units/{id}/tariffs
pub async fn add_tariff(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<AddTariffRequest>,
) -> ApiResult<(StatusCode, Json<UnitTariff>)> {
    let tariff = state
        .unit_service
        .add_tariff(auth.context(), id, req.price, req.currency, req.range_type)
        .await?;
    Ok((StatusCode::CREATED, Json(tariff)))
}

/// GET /accommodation-units/{id}/relevant-requests
pub async fn relevant_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<SearchRequest>>> {
    let result = state
        .unit_service
        .relevant_requests(auth.context(), id, &params.into_page_request())
        .await?;
    Ok(Json(result))
}

/// GET /accommodation-units/{id}/price-requests
pub async fn price_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<PriceRequest>>> {
    let result = state
        .unit_service
        .price_requests(auth.context(), id, &params.into_page_request())
        .await?;
    Ok(Json(result))
}

/// GET /accommodation-units/{id}/pending-reservations
pub async fn pending_reservations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<Reservation>>> {
    let result = state
        .unit_service
        .pending_reservations(auth.context(), id, &params.into_page_request())
        .await?;
    Ok(Json(result))
}
