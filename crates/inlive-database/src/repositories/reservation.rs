//! Reservation repository implementation.

use sqlx::PgPool;

use inlive_core::error::{AppError, ErrorKind};
use inlive_core::result::AppResult;
use inlive_core::types::pagination::{PageRequest, PageResponse};
use inlive_entity::reservation::{CreateReservation, Reservation, ReservationStatus};

/// Repository for reservations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a reservation by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservation WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find reservation by id", e)
        })
    }

    /// List reservations for a unit, paginated.
    pub async fn find_by_unit(
        &self,
        unit_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        self.page_query("acc_unit_id = $1", unit_id, page, "Failed to list reservations by unit")
            .await
    }

    /// List reservations held by a client, paginated.
    pub async fn find_by_client(
        &self,
        client_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        self.page_query("client_id = $1", client_id, page, "Failed to list reservations by client")
            .await
    }

    /// List reservations originating from a search request, paginated.
    pub async fn find_by_search_request(
        &self,
        search_request_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        self.page_query(
            "search_request_id = $1",
            search_request_id,
            page,
            "Failed to list reservations by search request",
        )
        .await
    }

    /// List reservations across all units of an accommodation, paginated.
    pub async fn find_by_accommodation(
        &self,
        acc_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservation r \
             INNER JOIN accommodation_units au ON au.id = r.acc_unit_id \
             WHERE au.acc_id = $1 AND r.is_deleted = FALSE",
        )
        .bind(acc_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count reservations", e)
        })?;

        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT r.* FROM reservation r \
             INNER JOIN accommodation_units au ON au.id = r.acc_unit_id \
             WHERE au.acc_id = $1 AND r.is_deleted = FALSE \
             ORDER BY r.created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(acc_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to list reservations by accommodation",
                e,
            )
        })?;

        Ok(PageResponse::new(
            reservations,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List reservations awaiting the owner's decision for a unit.
    pub async fn find_pending_by_unit(
        &self,
        unit_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservation \
             WHERE acc_unit_id = $1 AND status = 'WAITING_TO_APPROVE' AND is_deleted = FALSE",
        )
        .bind(unit_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count pending reservations", e)
        })?;

        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservation \
             WHERE acc_unit_id = $1 AND status = 'WAITING_TO_APPROVE' AND is_deleted = FALSE \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(unit_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list pending reservations", e)
        })?;

        Ok(PageResponse::new(
            reservations,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Check whether a reservation already exists for a price offer.
    pub async fn exists_for_price_request(&self, price_request_id: i64) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservation WHERE price_request_id = $1 AND is_deleted = FALSE",
        )
        .bind(price_request_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check reservation existence", e)
        })?;

        Ok(count > 0)
    }

    /// Create a new reservation in `WAITING_TO_APPROVE` status.
    pub async fn create(&self, data: &CreateReservation) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservation \
                 (client_id, acc_unit_id, price_request_id, search_request_id, status, is_need_to_pay) \
             VALUES ($1, $2, $3, $4, 'WAITING_TO_APPROVE', FALSE) \
             RETURNING *",
        )
        .bind(data.client_id)
        .bind(data.acc_unit_id)
        .bind(data.price_request_id)
        .bind(data.search_request_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create reservation", e)
        })
    }

    /// Move a reservation to a new status.
    pub async fn update_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservation SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update reservation", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))
    }

    async fn page_query(
        &self,
        predicate: &str,
        id: i64,
        page: &PageRequest,
        context: &'static str,
    ) -> AppResult<PageResponse<Reservation>> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM reservation WHERE {predicate} AND is_deleted = FALSE"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, context, e))?;

        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT * FROM reservation WHERE {predicate} AND is_deleted = FALSE \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, context, e))?;

        Ok(PageResponse::new(
            reservations,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
