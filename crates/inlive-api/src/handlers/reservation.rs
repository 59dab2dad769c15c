//! Reservation handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use inlive_core::types::pagination::PageResponse;
use inlive_entity::reservation::Reservation;

use crate::dto::request::{CreateReservationRequest, ReservationStatusRequest};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /reservations
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateReservationRequest>,
) -> ApiResult<(StatusCode, Json<Reservation>)> {
    let reservation = state
        .reservation_service
        .create(auth.context(), req.price_request_id)
        .await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// GET /reservations/{id}
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Reservation>> {
    Ok(Json(state.reservation_service.get(id).await?))
}

/// PUT /reservations/{id}/status — owner verdict.
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<ReservationStatusRequest>,
) -> ApiResult<Json<Reservation>> {
    let reservation = state
        .reservation_service
        .update_status(auth.context(), id, req.status)
        .await?;
    Ok(Json(reservation))
}

/// PUT /reservations/{id}/final-status — how the stay ended.
pub async fn final_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<ReservationStatusRequest>,
) -> ApiResult<Json<Reservation>> {
    let reservation = state
        .reservation_service
        .final_status(auth.context(), id, req.status)
        .await?;
    Ok(Json(reservation))
}

/// PATCH /reservations/{id}/cancel — client cancellation.
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Reservation>> {
    let reservation = state
        .reservation_service
        .cancel(auth.context(), id)
        .await?;
    Ok(Json(reservation))
}

/// GET /reservations/by-unit/{unit_id}
pub async fn by_unit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(unit_id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<Reservation>>> {
    let result = state
        .reservation_service
        .by_unit(auth.context(), unit_id, &params.into_page_request())
        .await?;
    Ok(Json(result))
}

/// GET /reservations/by-unit/{unit_id}/pending
pub async fn pending_by_unit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(unit_id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<Reservation>>> {
    let result = state
        .unit_service
        .pending_reservations(auth.context(), unit_id, &params.into_page_request())
        .await?;
    Ok(Json(result))
}

/// GET /reservations/by-accommodation/{acc_id}
pub async fn by_accommodation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(acc_id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<Reservation>>> {
    let result = state
        .reservation_service
        .by_accommodation(auth.context(), acc_id, &params.into_page_request())
        .await?;
    Ok(Json(result))
}

/// GET /reservations/by-search-request/{search_request_id}
pub async fn by_search_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(search_request_id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<Reservation>>> {
    let result = state
        .reservation_service
        .by_search_request(auth.context(), search_request_id, &params.into_page_request())
        .await?;
    Ok(Json(result))
}

/// GET /reservations/my
pub async fn my(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<Reservation>>> {
    let result = state
        .reservation_service
        .my(auth.context(), &params.into_page_request())
        .await?;
    Ok(Json(result))
}
