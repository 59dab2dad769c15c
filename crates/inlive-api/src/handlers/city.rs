//! City reference data handlers.

use axum::Json;
use axum::extract::State;

use inlive_entity::city::City;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /cities
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> ApiResult<Json<Vec<City>>> {
    Ok(Json(state.city_service.list().await?))
}
