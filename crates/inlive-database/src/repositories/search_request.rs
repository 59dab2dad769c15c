//! Search request repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use inlive_core::error::{AppError, ErrorKind};
use inlive_core::result::AppResult;
use inlive_core::types::pagination::{PageRequest, PageResponse};
use inlive_entity::search_request::{
    CreateSearchRequest, SearchRequest, SearchRequestDictionary, SearchRequestDistrict,
    SearchRequestStatus, SearchRequestUnitType,
};

/// Statuses under which a request is shown to accommodation owners.
const ACTIVE_STATUSES: &str = "('OPEN_TO_PRICE_REQUEST', 'PRICE_REQUEST_PENDING', 'WAIT_TO_RESERVATION')";

/// Statuses the expiry sweep may close. A request whose offer was already
/// accepted (WAIT_TO_RESERVATION) is awaiting the owner's verdict and must
/// not be expired out from under the booking.
const EXPIRABLE_STATUSES: [SearchRequestStatus; 2] = [
    SearchRequestStatus::OpenToPriceRequest,
    SearchRequestStatus::PriceRequestPending,
];

/// Repository for search requests and their relevance matching.
#[derive(Debug, Clone)]
pub struct SearchRequestRepository {
    pool: PgPool,
}

impl SearchRequestRepository {
    /// Create a new search request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a search request by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<SearchRequest>> {
        sqlx::query_as::<_, SearchRequest>(
            "SELECT * FROM acc_search_request WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find search request by id", e)
        })
    }

    /// List search requests authored by a user, paginated.
    pub async fn find_by_author(
        &self,
        author_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SearchRequest>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM acc_search_request \
             WHERE author_id = $1 AND is_deleted = FALSE",
        )
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count search requests", e)
        })?;

        let requests = sqlx::query_as::<_, SearchRequest>(
            "SELECT * FROM acc_search_request \
             WHERE author_id = $1 AND is_deleted = FALSE \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(author_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list search requests", e)
        })?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a search request together with its unit type, dictionary and
    /// district links, in one transaction.
    pub async fn create(
        &self,
        data: &CreateSearchRequest,
        expires_at: DateTime<Utc>,
    ) -> AppResult<SearchRequest> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let request = sqlx::query_as::<_, SearchRequest>(
            "INSERT INTO acc_search_request \
                 (author_id, from_rating, to_rating, from_date, to_date, one_night, \
                  price, count_of_people, status, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'OPEN_TO_PRICE_REQUEST', $9) \
             RETURNING *",
        )
        .bind(data.author_id)
        .bind(data.from_rating)
        .bind(data.to_rating)
        .bind(data.from_date)
        .bind(data.to_date)
        .bind(data.one_night)
        .bind(data.price)
        .bind(data.count_of_people)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create search request", e)
        })?;

        for unit_type in &data.unit_types {
            sqlx::query(
                "INSERT INTO acc_search_request_unit_type (search_request_id, unit_type) \
                 VALUES ($1, $2)",
            )
            .bind(request.id)
            .bind(unit_type)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to link unit type", e)
            })?;
        }

        for dictionary_id in &data.dictionary_ids {
            sqlx::query(
                "INSERT INTO acc_search_request_dictionary (search_request_id, dictionary_id) \
                 VALUES ($1, $2)",
            )
            .bind(request.id)
            .bind(dictionary_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to link dictionary", e)
            })?;
        }

        for district_id in &data.district_ids {
            sqlx::query(
                "INSERT INTO acc_search_request_district (search_request_id, district_id) \
                 VALUES ($1, $2)",
            )
            .bind(request.id)
            .bind(district_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to link district", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(request)
    }

    /// Update the budget on a search request. All other parameters are
    /// immutable once published.
    pub async fn update_price(&self, id: i64, price: f64) -> AppResult<SearchRequest> {
        sqlx::query_as::<_, SearchRequest>(
            "UPDATE acc_search_request SET price = $2, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE RETURNING *",
        )
        .bind(id)
        .bind(price)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update search request price", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Search request {id} not found")))
    }

    /// Move a search request to a new status.
    pub async fn update_status(
        &self,
        id: i64,
        status: SearchRequestStatus,
    ) -> AppResult<SearchRequest> {
        sqlx::query_as::<_, SearchRequest>(
            "UPDATE acc_search_request SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update search request", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Search request {id} not found")))
    }

    /// Soft-delete a search request by ID.
    pub async fn soft_delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE acc_search_request SET is_deleted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete search request", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Mark all overdue requests still awaiting offers as expired. Returns
    /// the IDs of the requests that were expired.
    pub async fn expire_overdue(&self, now: DateTime<Utc>) -> AppResult<Vec<i64>> {
        let statuses = EXPIRABLE_STATUSES
            .iter()
            .map(|s| format!("'{s}'"))
            .collect::<Vec<_>>()
            .join(", ");

        sqlx::query_scalar(&format!(
            "UPDATE acc_search_request SET status = 'EXPIRED', updated_at = NOW() \
             WHERE expires_at <= $1 \
               AND status IN ({statuses}) \
               AND is_deleted = FALSE \
             RETURNING id",
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to expire search requests", e)
        })
    }

    /// List active requests relevant for a unit, paginated.
    ///
    /// A request matches when its status is active, the accommodation's
    /// rating falls in the requested range, the accommodation's district is
    /// among the requested districts, the unit's type is among the requested
    /// types, and every requested service and condition is present on the
    /// unit.
    pub async fn find_relevant_for_unit(
        &self,
        unit_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SearchRequest>> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(DISTINCT asr.id) {}",
            relevant_for_unit_body()
        ))
        .bind(unit_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count relevant requests", e)
        })?;

        let requests = sqlx::query_as::<_, SearchRequest>(&format!(
            "SELECT DISTINCT asr.* {} ORDER BY asr.created_at DESC LIMIT $2 OFFSET $3",
            relevant_for_unit_body()
        ))
        .bind(unit_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list relevant requests", e)
        })?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List active requests relevant for any unit of an accommodation,
    /// paginated. Same matching rules as [`Self::find_relevant_for_unit`],
    /// applied across all of the accommodation's units.
    pub async fn find_relevant_for_accommodation(
        &self,
        acc_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SearchRequest>> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(DISTINCT asr.id) {}",
            relevant_for_accommodation_body()
        ))
        .bind(acc_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count relevant requests", e)
        })?;

        let requests = sqlx::query_as::<_, SearchRequest>(&format!(
            "SELECT DISTINCT asr.* {} ORDER BY asr.created_at DESC LIMIT $2 OFFSET $3",
            relevant_for_accommodation_body()
        ))
        .bind(acc_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list relevant requests", e)
        })?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List unit type links for a search request.
    pub async fn find_unit_types(&self, id: i64) -> AppResult<Vec<SearchRequestUnitType>> {
        sqlx::query_as::<_, SearchRequestUnitType>(
            "SELECT * FROM acc_search_request_unit_type \
             WHERE search_request_id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list unit types", e))
    }

    /// List dictionary links for a search request.
    pub async fn find_dictionaries(&self, id: i64) -> AppResult<Vec<SearchRequestDictionary>> {
        sqlx::query_as::<_, SearchRequestDictionary>(
            "SELECT * FROM acc_search_request_dictionary \
             WHERE search_request_id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list dictionary links", e)
        })
    }

    /// List district links for a search request.
    pub async fn find_districts(&self, id: i64) -> AppResult<Vec<SearchRequestDistrict>> {
        sqlx::query_as::<_, SearchRequestDistrict>(
            "SELECT * FROM acc_search_request_district \
             WHERE search_request_id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list district links", e))
    }
}

/// Shared FROM/WHERE body for the unit relevance query.
fn relevant_for_unit_body() -> String {
    relevance_body("au.id = $1")
}

/// Shared FROM/WHERE body for the accommodation relevance query.
fn relevant_for_accommodation_body() -> String {
    relevance_body("au.acc_id = $1")
}

fn relevance_body(unit_predicate: &str) -> String {
    format!(
        "FROM acc_search_request asr \
         INNER JOIN accommodation_units au ON {unit_predicate} AND au.is_deleted = FALSE \
         INNER JOIN accommodations acc ON acc.id = au.acc_id AND acc.is_deleted = FALSE \
         WHERE asr.status IN {ACTIVE_STATUSES} \
           AND asr.is_deleted = FALSE \
           AND (asr.from_rating IS NULL OR acc.rating >= asr.from_rating) \
           AND (asr.to_rating IS NULL OR acc.rating <= asr.to_rating) \
           AND EXISTS ( \
               SELECT 1 FROM acc_search_request_district asrd \
               WHERE asrd.search_request_id = asr.id \
                 AND asrd.district_id = acc.district_id \
                 AND asrd.is_deleted = FALSE) \
           AND EXISTS ( \
               SELECT 1 FROM acc_search_request_unit_type asrut \
               WHERE asrut.search_request_id = asr.id \
                 AND asrut.unit_type = au.unit_type \
                 AND asrut.is_deleted = FALSE) \
           AND NOT EXISTS ( \
               SELECT 1 FROM acc_search_request_dictionary asrd \
               INNER JOIN dictionaries d ON d.id = asrd.dictionary_id \
                 AND d.key IN ('ACC_SERVICE', 'ACC_CONDITION') \
               WHERE asrd.search_request_id = asr.id \
                 AND asrd.is_deleted = FALSE \
                 AND NOT EXISTS ( \
                     SELECT 1 FROM acc_unit_dictionary aud \
                     WHERE aud.acc_unit_id = au.id \
                       AND aud.dictionary_id = d.id \
                       AND aud.is_deleted = FALSE))"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_leaves_accepted_offers_alone() {
        assert!(!EXPIRABLE_STATUSES.contains(&SearchRequestStatus::WaitToReservation));
        for status in EXPIRABLE_STATUSES {
            assert!(status.accepts_price_requests());
        }
    }
}
