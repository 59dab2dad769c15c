//! District repository implementation.

use sqlx::PgPool;

use inlive_core::error::{AppError, ErrorKind};
use inlive_core::result::AppResult;
use inlive_entity::district::District;

/// Repository for district reference data. Rows are seeded out of band;
/// the application only reads them.
#[derive(Debug, Clone)]
pub struct DistrictRepository {
    pool: PgPool,
}

impl DistrictRepository {
    /// Create a new district repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a district by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<District>> {
        sqlx::query_as::<_, District>(
            "SELECT * FROM districts WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find district by id", e))
    }

    /// List all districts.
    pub async fn find_all(&self) -> AppResult<Vec<District>> {
        sqlx::query_as::<_, District>(
            "SELECT * FROM districts WHERE is_deleted = FALSE ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list districts", e))
    }

    /// List districts belonging to a city.
    pub async fn find_by_city(&self, city_id: i64) -> AppResult<Vec<District>> {
        sqlx::query_as::<_, District>(
            "SELECT * FROM districts WHERE city_id = $1 AND is_deleted = FALSE ORDER BY name ASC",
        )
        .bind(city_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list districts by city", e)
        })
    }
}
