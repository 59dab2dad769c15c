//! Accommodation listing handlers.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;

use inlive_core::types::pagination::PageResponse;
use inlive_entity::accommodation::{Accommodation, AccommodationImage, UpdateAccommodation};
use inlive_entity::search_request::SearchRequest;
use inlive_service::services::AccommodationDetails;

use crate::dto::request::{
    AccommodationSearchParams, CreateAccommodationRequest, UpdateAccDictionariesRequest,
};
use crate::dto::validate_payload;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, MultipartForm, PaginationParams};
use crate::state::AppState;

/// POST /accommodations (multipart: `data`, `photos`, `documents`)
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Accommodation>)> {
    let mut form = MultipartForm::read(multipart).await?;
    let req: CreateAccommodationRequest = form.json_field("data")?;
    validate_payload(&req)?;

    let photos = form.take_files("photos");
    let documents = form.take_files("documents");

    let accommodation = state
        .accommodation_service
        .create(auth.context(), req.into_create(), photos, documents)
        .await?;
    Ok((StatusCode::CREATED, Json(accommodation)))
}

/// GET /accommodations/{id}
pub async fn details(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<AccommodationDetails>> {
    Ok(Json(state.accommodation_service.details(id).await?))
}

/// GET /accommodations/search
pub async fn search(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<AccommodationSearchParams>,
) -> ApiResult<Json<PageResponse<Accommodation>>> {
    let page = PaginationParams {
        page: params.page.unwrap_or(1),
        page_size: params.page_size.unwrap_or(20),
    }
    .into_page_request();

    let result = state
        .accommodation_service
        .search(&params.filter(), &page)
        .await?;
    Ok(Json(result))
}

/// GET /accommodations/owner/search — the caller's own listings.
pub async fn owner_search(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<AccommodationSearchParams>,
) -> ApiResult<Json<PageResponse<Accommodation>>> {
    let page = PaginationParams {
        page: params.page.unwrap_or(1),
        page_size: params.page_size.unwrap_or(20),
    }
    .into_page_request();

    let result = state
        .accommodation_service
        .owner_listings(auth.context(), params.filter(), &page)
        .await?;
    Ok(Json(result))
}

/// PUT /accommodations/{id}/main-info
pub async fn update_main_info(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateAccommodation>,
) -> ApiResult<Json<Accommodation>> {
    let accommodation = state
        .accommodation_service
        .update_main_info(auth.context(), id, req)
        .await?;
    Ok(Json(accommodation))
}

/// PUT /accommodations/{id}/dictionaries
pub async fn update_dictionaries(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateAccDictionariesRequest>,
) -> ApiResult<StatusCode> {
    state
        .accommodation_service
        .update_dictionaries(auth.context(), id, req.key, req.dictionary_ids)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /accommodations/{id}/photos (multipart, part `images`)
pub async fn update_photos(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> ApiResult<Json<Vec<AccommodationImage>>> {
    let mut form = MultipartForm::read(multipart).await?;
    let photos = form.take_files("images");

    let images = state
        .accommodation_service
        .update_photos(auth.context(), id, photos)
        .await?;
    Ok(Json(images))
}

/// DELETE /accommodations/{id}/photos — bulk, by photo URL.
pub async fn delete_photos(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(photo_urls): Json<Vec<String>>,
) -> ApiResult<StatusCode> {
    state
        .accommodation_service
        .delete_photos(auth.context(), id, photo_urls)
        .await?;
    Ok(StatusCode::OK)
}

/// DELETE /accommodations/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.accommodation_service.delete(auth.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /accommodations/{id}/approve (admin)
pub async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Accommodation>> {
    Ok(Json(
        state.accommodation_service.approve(auth.context(), id).await?,
    ))
}

/// PATCH /accommodations/{id}/reject (admin)
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Accommodation>> {
    Ok(Json(
        state.accommodation_service.reject(auth.context(), id).await?,
    ))
}

/// GET /accommodations/{id}/relevant-requests
pub async fn relevant_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<SearchRequest>>> {
    let result = state
        .accommodation_service
        .relevant_requests(auth.context(), id, &params.into_page_request())
        .await?;
    Ok(Json(result))
}
