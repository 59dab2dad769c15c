//! City repository implementation.

use sqlx::PgPool;

use inlive_core::error::{AppError, ErrorKind};
use inlive_core::result::AppResult;
use inlive_entity::city::City;

/// Repository for city reference data. Rows are seeded out of band;
/// the application only reads them.
#[derive(Debug, Clone)]
pub struct CityRepository {
    pool: PgPool,
}

impl CityRepository {
    /// Create a new city repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a city by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<City>> {
        sqlx::query_as::<_, City>("SELECT * FROM cities WHERE id = $1 AND is_deleted = FALSE")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find city by id", e))
    }

    /// List all cities.
    pub async fn find_all(&self) -> AppResult<Vec<City>> {
        sqlx::query_as::<_, City>(
            "SELECT * FROM cities WHERE is_deleted = FALSE ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list cities", e))
    }
}
