//! Price request repository implementation.

use sqlx::PgPool;

use inlive_core::error::{AppError, ErrorKind};
use inlive_core::result::AppResult;
use inlive_core::types::pagination::{PageRequest, PageResponse};
use inlive_entity::price_request::{
    ClientResponseStatus, CreatePriceRequest, PriceRequest, PriceRequestStatus,
};

/// Repository for price offers.
#[derive(Debug, Clone)]
pub struct PriceRequestRepository {
    pool: PgPool,
}

impl PriceRequestRepository {
    /// Create a new price request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a price request by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<PriceRequest>> {
        sqlx::query_as::<_, PriceRequest>(
            "SELECT * FROM price_request WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find price request by id", e)
        })
    }

    /// List active offers for a unit, paginated.
    pub async fn find_by_unit(
        &self,
        unit_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<PriceRequest>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM price_request \
             WHERE acc_unit_id = $1 AND is_deleted = FALSE",
        )
        .bind(unit_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count price requests", e)
        })?;

        let requests = sqlx::query_as::<_, PriceRequest>(
            "SELECT * FROM price_request \
             WHERE acc_unit_id = $1 AND is_deleted = FALSE \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(unit_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list price requests", e)
        })?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List active offers against a search request, paginated.
    pub async fn find_by_search_request(
        &self,
        search_request_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<PriceRequest>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM price_request \
             WHERE search_request_id = $1 AND is_deleted = FALSE",
        )
        .bind(search_request_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count price requests", e)
        })?;

        let requests = sqlx::query_as::<_, PriceRequest>(
            "SELECT * FROM price_request \
             WHERE search_request_id = $1 AND is_deleted = FALSE \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(search_request_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list price requests", e)
        })?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Check whether an active offer already exists for the given pair.
    pub async fn exists_for_pair(&self, search_request_id: i64, unit_id: i64) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM price_request \
             WHERE search_request_id = $1 AND acc_unit_id = $2 AND is_deleted = FALSE",
        )
        .bind(search_request_id)
        .bind(unit_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check price request pair", e)
        })?;

        Ok(count > 0)
    }

    /// Submit a new offer. Starts with the client response pending.
    pub async fn create(
        &self,
        data: &CreatePriceRequest,
        status: PriceRequestStatus,
    ) -> AppResult<PriceRequest> {
        sqlx::query_as::<_, PriceRequest>(
            "INSERT INTO price_request \
                 (search_request_id, acc_unit_id, price, status, client_response_status) \
             VALUES ($1, $2, $3, $4, 'WAITING') \
             RETURNING *",
        )
        .bind(data.search_request_id)
        .bind(data.acc_unit_id)
        .bind(data.price)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("price_request_search_request_id_acc_unit_id_key") =>
            {
                AppError::conflict("An offer for this unit already exists".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create price request", e),
        })
    }

    /// Revise an offer's status and price. The client's response resets to
    /// pending so the revised offer must be answered again.
    pub async fn update(
        &self,
        id: i64,
        status: PriceRequestStatus,
        price: f64,
    ) -> AppResult<PriceRequest> {
        sqlx::query_as::<_, PriceRequest>(
            "UPDATE price_request SET status = $2, price = $3, \
                 client_response_status = 'WAITING', updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(price)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update price request", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Price request {id} not found")))
    }

    /// Record the client's response to an offer.
    pub async fn set_client_response(
        &self,
        id: i64,
        response: ClientResponseStatus,
    ) -> AppResult<PriceRequest> {
        sqlx::query_as::<_, PriceRequest>(
            "UPDATE price_request SET client_response_status = $2, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE RETURNING *",
        )
        .bind(id)
        .bind(response)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update client response", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Price request {id} not found")))
    }

    /// Soft-delete a price request by ID.
    pub async fn soft_delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE price_request SET is_deleted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete price request", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
