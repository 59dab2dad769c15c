//! Accommodation unit repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use inlive_core::error::{AppError, ErrorKind};
use inlive_core::result::AppResult;
use inlive_core::types::pagination::{PageRequest, PageResponse};
use inlive_entity::unit::{
    AccommodationUnit, CreateUnit, RangeType, UnitDictionary, UnitImage, UnitTariff, UnitType,
    UpdateUnit,
};

/// Filter parameters for unit listing.
#[derive(Debug, Clone, Default)]
pub struct UnitFilter {
    /// Restrict to an accommodation.
    pub acc_id: Option<i64>,
    /// Restrict by unit type.
    pub unit_type: Option<UnitType>,
    /// Restrict by availability.
    pub is_available: Option<bool>,
    /// Partial name match.
    pub name: Option<String>,
    /// Minimum guest capacity.
    pub min_capacity: Option<i32>,
    /// Maximum guest capacity.
    pub max_capacity: Option<i32>,
}

/// What a published search request demands of a unit. Used to verify that
/// at least one available unit can satisfy the request before it is created.
#[derive(Debug, Clone)]
pub struct UnitMatchCriteria {
    /// Acceptable unit types.
    pub unit_types: Vec<UnitType>,
    /// Acceptable districts.
    pub district_ids: Vec<i64>,
    /// Minimum accommodation rating.
    pub from_rating: Option<f64>,
    /// Maximum accommodation rating.
    pub to_rating: Option<f64>,
    /// Required guest capacity.
    pub capacity: i32,
    /// Services and conditions that must all be present on the unit.
    pub dictionary_ids: Vec<i64>,
    /// Budget ceiling checked against the unit's cheapest tariff.
    pub max_price: Option<f64>,
    /// Desired stay start.
    pub check_in: DateTime<Utc>,
    /// Desired stay end.
    pub check_out: DateTime<Utc>,
}

/// Repository for units and their attachments.
#[derive(Debug, Clone)]
pub struct UnitRepository {
    pool: PgPool,
}

impl UnitRepository {
    /// Create a new unit repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a unit by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<AccommodationUnit>> {
        sqlx::query_as::<_, AccommodationUnit>(
            "SELECT * FROM accommodation_units WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find unit by id", e))
    }

    /// List units matching the filter, paginated.
    pub async fn search(
        &self,
        filter: &UnitFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AccommodationUnit>> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM accommodation_units");
        push_filters(&mut count_qb, filter);

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count units", e))?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM accommodation_units");
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(page.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset() as i64);

        let units = qb
            .build_query_as::<AccommodationUnit>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search units", e))?;

        Ok(PageResponse::new(
            units,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count available units satisfying every demand of a search request,
    /// including freedom from overlapping reservations in the stay period.
    pub async fn count_matching(&self, criteria: &UnitMatchCriteria) -> AppResult<i64> {
        let unit_types: Vec<String> = criteria
            .unit_types
            .iter()
            .map(|t| t.as_str().to_string())
            .collect();

        sqlx::query_scalar(
            "SELECT COUNT(*) FROM accommodation_units au \
             INNER JOIN accommodations acc ON acc.id = au.acc_id AND acc.is_deleted = FALSE \
             WHERE au.is_deleted = FALSE \
               AND au.is_available = TRUE \
               AND au.unit_type::text = ANY($1) \
               AND acc.district_id = ANY($2) \
               AND ($3::float8 IS NULL OR acc.rating >= $3) \
               AND ($4::float8 IS NULL OR acc.rating <= $4) \
               AND au.capacity >= $5 \
               AND NOT EXISTS ( \
                   SELECT 1 FROM unnest($6::bigint[]) AS req(id) \
                   WHERE NOT EXISTS ( \
                       SELECT 1 FROM acc_unit_dictionary aud \
                       WHERE aud.acc_unit_id = au.id \
                         AND aud.dictionary_id = req.id \
                         AND aud.is_deleted = FALSE)) \
               AND ($7::float8 IS NULL OR NOT EXISTS ( \
                       SELECT 1 FROM acc_unit_tariffs t \
                       WHERE t.acc_unit_id = au.id AND t.is_deleted = FALSE) \
                   OR (SELECT MIN(t.price) FROM acc_unit_tariffs t \
                       WHERE t.acc_unit_id = au.id AND t.is_deleted = FALSE) <= $7) \
               AND NOT EXISTS ( \
                   SELECT 1 FROM reservation r \
                   INNER JOIN acc_search_request sr ON sr.id = r.search_request_id \
                   WHERE r.acc_unit_id = au.id \
                     AND r.is_deleted = FALSE \
                     AND r.status IN ('WAITING_TO_APPROVE', 'APPROVED') \
                     AND sr.from_date < $9 \
                     AND sr.to_date > $8)",
        )
        .bind(&unit_types)
        .bind(&criteria.district_ids)
        .bind(criteria.from_rating)
        .bind(criteria.to_rating)
        .bind(criteria.capacity)
        .bind(&criteria.dictionary_ids)
        .bind(criteria.max_price)
        .bind(criteria.check_in)
        .bind(criteria.check_out)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count matching units", e))
    }

    /// Create a new unit together with its dictionary links and initial
    /// image URLs, in one transaction.
    pub async fn create(
        &self,
        data: &CreateUnit,
        image_urls: &[String],
    ) -> AppResult<AccommodationUnit> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let unit = sqlx::query_as::<_, AccommodationUnit>(
            "INSERT INTO accommodation_units \
                 (acc_id, unit_type, name, description, capacity, area, floor) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(data.acc_id)
        .bind(data.unit_type)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.capacity)
        .bind(data.area)
        .bind(data.floor)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create unit", e))?;

        for dictionary_id in &data.dictionary_ids {
            sqlx::query(
                "INSERT INTO acc_unit_dictionary (acc_id, acc_unit_id, dictionary_id) \
                 VALUES ($1, $2, $3)",
            )
            .bind(data.acc_id)
            .bind(unit.id)
            .bind(dictionary_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to link dictionary", e)
            })?;
        }

        for url in image_urls {
            sqlx::query(
                "INSERT INTO acc_unit_images (acc_id, acc_unit_id, image_url) VALUES ($1, $2, $3)",
            )
            .bind(data.acc_id)
            .bind(unit.id)
            .bind(url)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to attach image", e))?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(unit)
    }

    /// Update a unit's editable fields.
    pub async fn update(&self, id: i64, data: &UpdateUnit) -> AppResult<AccommodationUnit> {
        sqlx::query_as::<_, AccommodationUnit>(
            "UPDATE accommodation_units SET unit_type = COALESCE($2, unit_type), \
                                            name = COALESCE($3, name), \
                                            description = COALESCE($4, description), \
                                            capacity = COALESCE($5, capacity), \
                                            area = COALESCE($6, area), \
                                            floor = COALESCE($7, floor), \
                                            is_available = COALESCE($8, is_available), \
                                            updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE RETURNING *",
        )
        .bind(id)
        .bind(data.unit_type)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.capacity)
        .bind(data.area)
        .bind(data.floor)
        .bind(data.is_available)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update unit", e))?
        .ok_or_else(|| AppError::not_found(format!("Unit {id} not found")))
    }

    /// Soft-delete a unit by ID.
    pub async fn soft_delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE accommodation_units SET is_deleted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete unit", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// List images attached to a unit.
    pub async fn find_images(&self, unit_id: i64) -> AppResult<Vec<UnitImage>> {
        sqlx::query_as::<_, UnitImage>(
            "SELECT * FROM acc_unit_images WHERE acc_unit_id = $1 AND is_deleted = FALSE \
             ORDER BY created_at ASC",
        )
        .bind(unit_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list unit images", e))
    }

    /// List tariffs offered for a unit.
    pub async fn find_tariffs(&self, unit_id: i64) -> AppResult<Vec<UnitTariff>> {
        sqlx::query_as::<_, UnitTariff>(
            "SELECT * FROM acc_unit_tariffs WHERE acc_unit_id = $1 AND is_deleted = FALSE \
             ORDER BY created_at ASC",
        )
        .bind(unit_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tariffs", e))
    }

    /// Add a tariff for a unit.
    pub async fn add_tariff(
        &self,
        acc_id: i64,
        unit_id: i64,
        price: f64,
        currency: &str,
        range_type: RangeType,
    ) -> AppResult<UnitTariff> {
        sqlx::query_as::<_, UnitTariff>(
            "INSERT INTO acc_unit_tariffs (acc_id, acc_unit_id, price, currency, range_type) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(acc_id)
        .bind(unit_id)
        .bind(price)
        .bind(currency)
        .bind(range_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add tariff", e))
    }

    /// List dictionary links for a unit.
    pub async fn find_dictionaries(&self, unit_id: i64) -> AppResult<Vec<UnitDictionary>> {
        sqlx::query_as::<_, UnitDictionary>(
            "SELECT * FROM acc_unit_dictionary WHERE acc_unit_id = $1 AND is_deleted = FALSE",
        )
        .bind(unit_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list unit dictionary links", e)
        })
    }

    /// Replace all dictionary links on a unit with a new set.
    pub async fn replace_dictionaries(
        &self,
        acc_id: i64,
        unit_id: i64,
        dictionary_ids: &[i64],
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query(
            "UPDATE acc_unit_dictionary SET is_deleted = TRUE, updated_at = NOW() \
             WHERE acc_unit_id = $1 AND is_deleted = FALSE",
        )
        .bind(unit_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to clear dictionary links", e)
        })?;

        for dictionary_id in dictionary_ids {
            sqlx::query(
                "INSERT INTO acc_unit_dictionary (acc_id, acc_unit_id, dictionary_id) \
                 VALUES ($1, $2, $3)",
            )
            .bind(acc_id)
            .bind(unit_id)
            .bind(dictionary_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to link dictionary", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}

fn push_filters(qb: &mut QueryBuilder<Postgres>, filter: &UnitFilter) {
    qb.push(" WHERE is_deleted = FALSE");
    if let Some(acc_id) = filter.acc_id {
        qb.push(" AND acc_id = ");
        qb.push_bind(acc_id);
    }
    if let Some(unit_type) = filter.unit_type {
        qb.push(" AND unit_type = ");
        qb.push_bind(unit_type);
    }
    if let Some(is_available) = filter.is_available {
        qb.push(" AND is_available = ");
        qb.push_bind(is_available);
    }
    if let Some(ref name) = filter.name {
        qb.push(" AND name ILIKE ");
        qb.push_bind(format!("%{name}%"));
    }
    if let Some(min_capacity) = filter.min_capacity {
        qb.push(" AND capacity >= ");
        qb.push_bind(min_capacity);
    }
    if let Some(max_capacity) = filter.max_capacity {
        qb.push(" AND capacity <= ");
        qb.push_bind(max_capacity);
    }
}
