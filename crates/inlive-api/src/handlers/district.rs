//! District reference data handlers.

use axum::Json;
use axum::extract::{Path, State};

use inlive_entity::district::District;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /districts
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<District>>> {
    Ok(Json(state.district_service.list().await?))
}

/// GET /districts/by-city/{city_id}
pub async fn by_city(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(city_id): Path<i64>,
) -> ApiResult<Json<Vec<District>>> {
    Ok(Json(state.district_service.by_city(city_id).await?))
}
