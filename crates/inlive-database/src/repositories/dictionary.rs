//! Dictionary repository implementation.

use sqlx::{PgPool, Postgres, QueryBuilder};

use inlive_core::error::{AppError, ErrorKind};
use inlive_core::result::AppResult;
use inlive_core::types::pagination::{PageRequest, PageResponse};
use inlive_entity::dictionary::{CreateDictionary, Dictionary, DictionaryKey, UpdateDictionary};

/// Repository for dictionary (reference data) operations.
#[derive(Debug, Clone)]
pub struct DictionaryRepository {
    pool: PgPool,
}

impl DictionaryRepository {
    /// Create a new dictionary repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a dictionary entry by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Dictionary>> {
        sqlx::query_as::<_, Dictionary>(
            "SELECT * FROM dictionaries WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find dictionary by id", e)
        })
    }

    /// Fetch all entries with the given IDs. Missing IDs are silently
    /// absent from the result.
    pub async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Dictionary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Dictionary>(
            "SELECT * FROM dictionaries WHERE id = ANY($1) AND is_deleted = FALSE",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch dictionaries by ids", e)
        })
    }

    /// Verify all given dictionary entry IDs exist. Returns the missing IDs.
    pub async fn find_missing(&self, ids: &[i64]) -> AppResult<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let existing: Vec<i64> = sqlx::query_scalar(
            "SELECT id FROM dictionaries WHERE id = ANY($1) AND is_deleted = FALSE",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check dictionary ids", e)
        })?;

        Ok(ids.iter().copied().filter(|id| !existing.contains(id)).collect())
    }

    /// List all dictionary entries.
    pub async fn find_all(&self) -> AppResult<Vec<Dictionary>> {
        sqlx::query_as::<_, Dictionary>(
            "SELECT * FROM dictionaries WHERE is_deleted = FALSE ORDER BY key, value ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list dictionaries", e))
    }

    /// List dictionary entries under a key category.
    pub async fn find_by_key(&self, key: DictionaryKey) -> AppResult<Vec<Dictionary>> {
        sqlx::query_as::<_, Dictionary>(
            "SELECT * FROM dictionaries WHERE key = $1 AND is_deleted = FALSE ORDER BY value ASC",
        )
        .bind(key)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list dictionaries by key", e)
        })
    }

    /// List entries matching the optional key and value filters, paginated.
    pub async fn search(
        &self,
        key: Option<DictionaryKey>,
        value: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Dictionary>> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM dictionaries");
        push_filters(&mut count_qb, key, value);

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count dictionaries", e)
            })?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM dictionaries");
        push_filters(&mut qb, key, value);
        qb.push(" ORDER BY key, value ASC LIMIT ");
        qb.push_bind(page.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset() as i64);

        let entries = qb
            .build_query_as::<Dictionary>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search dictionaries", e)
            })?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new dictionary entry.
    pub async fn create(&self, data: &CreateDictionary) -> AppResult<Dictionary> {
        sqlx::query_as::<_, Dictionary>(
            "INSERT INTO dictionaries (key, value) VALUES ($1, $2) RETURNING *",
        )
        .bind(data.key)
        .bind(&data.value)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("dictionaries_key_value_key") =>
            {
                AppError::conflict(format!(
                    "Dictionary entry '{}' already exists under {}",
                    data.value, data.key
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create dictionary", e),
        })
    }

    /// Update a dictionary entry's value.
    pub async fn update(&self, id: i64, data: &UpdateDictionary) -> AppResult<Dictionary> {
        sqlx::query_as::<_, Dictionary>(
            "UPDATE dictionaries SET value = $2, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE RETURNING *",
        )
        .bind(id)
        .bind(&data.value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update dictionary", e))?
        .ok_or_else(|| AppError::not_found(format!("Dictionary entry {id} not found")))
    }

    /// Soft-delete a dictionary entry by ID.
    pub async fn soft_delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE dictionaries SET is_deleted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete dictionary", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}

fn push_filters(qb: &mut QueryBuilder<Postgres>, key: Option<DictionaryKey>, value: Option<&str>) {
    qb.push(" WHERE is_deleted = FALSE");
    if let Some(key) = key {
        qb.push(" AND key = ");
        qb.push_bind(key);
    }
    if let Some(value) = value {
        qb.push(" AND value ILIKE ");
        qb.push_bind(format!("%{value}%"));
    }
}
