//! Accommodation repository implementation.

use sqlx::{PgPool, Postgres, QueryBuilder};

use inlive_core::error::{AppError, ErrorKind};
use inlive_core::result::AppResult;
use inlive_core::types::pagination::{PageRequest, PageResponse};
use inlive_entity::accommodation::{
    Accommodation, AccommodationDictionary, AccommodationDocument,
    AccommodationImage, CreateAccommodation, UpdateAccommodation,
};
use inlive_entity::dictionary::DictionaryKey;

/// Filter parameters for accommodation listing.
#[derive(Debug, Clone, Default)]
pub struct AccommodationFilter {
    /// Restrict to a city.
    pub city_id: Option<i64>,
    /// Restrict to a district.
    pub district_id: Option<i64>,
    /// Restrict by moderation verdict.
    pub approved: Option<bool>,
    /// Restrict to an owner.
    pub owner_id: Option<i64>,
    /// Minimum rating.
    pub min_rating: Option<f64>,
    /// Partial name match.
    pub name: Option<String>,
}

/// Repository for accommodations and their attachments.
#[derive(Debug, Clone)]
pub struct AccommodationRepository {
    pool: PgPool,
}

impl AccommodationRepository {
    /// Create a new accommodation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an accommodation by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Accommodation>> {
        sqlx::query_as::<_, Accommodation>(
            "SELECT * FROM accommodations WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find accommodation by id", e)
        })
    }

    /// List accommodations matching the filter, paginated.
    pub async fn search(
        &self,
        filter: &AccommodationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Accommodation>> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM accommodations");
        push_filters(&mut count_qb, filter);

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count accommodations", e)
            })?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM accommodations");
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(page.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset() as i64);

        let accommodations = qb
            .build_query_as::<Accommodation>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search accommodations", e)
            })?;

        Ok(PageResponse::new(
            accommodations,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new accommodation together with its dictionary links and
    /// initial image URLs, in one transaction.
    pub async fn create(
        &self,
        data: &CreateAccommodation,
        image_urls: &[String],
    ) -> AppResult<Accommodation> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let accommodation = sqlx::query_as::<_, Accommodation>(
            "INSERT INTO accommodations \
                 (city_id, district_id, owner_id, address, name, description, rating) \
             VALUES ($1, $2, $3, $4, $5, $6, 0) \
             RETURNING *",
        )
        .bind(data.city_id)
        .bind(data.district_id)
        .bind(data.owner_id)
        .bind(&data.address)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create accommodation", e)
        })?;

        for dictionary_id in &data.dictionary_ids {
            sqlx::query("INSERT INTO acc_dictionary (acc_id, dictionary_id) VALUES ($1, $2)")
                .bind(accommodation.id)
                .bind(dictionary_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to link dictionary", e)
                })?;
        }

        for url in image_urls {
            sqlx::query("INSERT INTO acc_images (acc_id, image_url) VALUES ($1, $2)")
                .bind(accommodation.id)
                .bind(url)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to attach image", e)
                })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(accommodation)
    }

    /// Update an accommodation's editable fields.
    pub async fn update(&self, id: i64, data: &UpdateAccommodation) -> AppResult<Accommodation> {
        sqlx::query_as::<_, Accommodation>(
            "UPDATE accommodations SET city_id = COALESCE($2, city_id), \
                                       district_id = COALESCE($3, district_id), \
                                       address = COALESCE($4, address), \
                                       name = COALESCE($5, name), \
                                       description = COALESCE($6, description), \
                                       updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE RETURNING *",
        )
        .bind(id)
        .bind(data.city_id)
        .bind(data.district_id)
        .bind(&data.address)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update accommodation", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Accommodation {id} not found")))
    }

    /// Record a moderation verdict.
    pub async fn set_approval(
        &self,
        id: i64,
        approved: bool,
        approved_by: i64,
    ) -> AppResult<Accommodation> {
        sqlx::query_as::<_, Accommodation>(
            "UPDATE accommodations SET is_approved = $2, approved_by = $3, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE RETURNING *",
        )
        .bind(id)
        .bind(approved)
        .bind(approved_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set approval", e))?
        .ok_or_else(|| AppError::not_found(format!("Accommodation {id} not found")))
    }

    /// Soft-delete an accommodation by ID.
    pub async fn soft_delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE accommodations SET is_deleted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete accommodation", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// List images attached to an accommodation.
    pub async fn find_images(&self, acc_id: i64) -> AppResult<Vec<AccommodationImage>> {
        sqlx::query_as::<_, AccommodationImage>(
            "SELECT * FROM acc_images WHERE acc_id = $1 AND is_deleted = FALSE \
             ORDER BY created_at ASC",
        )
        .bind(acc_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list images", e))
    }

    /// Attach image URLs to an accommodation.
    pub async fn add_images(&self, acc_id: i64, urls: &[String]) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        for url in urls {
            sqlx::query("INSERT INTO acc_images (acc_id, image_url) VALUES ($1, $2)")
                .bind(acc_id)
                .bind(url)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to attach image", e)
                })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }

    /// Soft-delete an image row by ID.
    pub async fn remove_image(&self, image_id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE acc_images SET is_deleted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(image_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove image", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// List documents attached to an accommodation.
    pub async fn find_documents(&self, acc_id: i64) -> AppResult<Vec<AccommodationDocument>> {
        sqlx::query_as::<_, AccommodationDocument>(
            "SELECT * FROM acc_documents WHERE acc_id = $1 AND is_deleted = FALSE \
             ORDER BY created_at ASC",
        )
        .bind(acc_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    /// Attach a document URL to an accommodation.
    pub async fn add_document(
        &self,
        acc_id: i64,
        document_url: &str,
        document_type: &str,
    ) -> AppResult<AccommodationDocument> {
        sqlx::query_as::<_, AccommodationDocument>(
            "INSERT INTO acc_documents (acc_id, document_url, document_type) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(acc_id)
        .bind(document_url)
        .bind(document_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to attach document", e))
    }

    /// List dictionary links for an accommodation.
    pub async fn find_dictionaries(&self, acc_id: i64) -> AppResult<Vec<AccommodationDictionary>> {
        sqlx::query_as::<_, AccommodationDictionary>(
            "SELECT * FROM acc_dictionary WHERE acc_id = $1 AND is_deleted = FALSE",
        )
        .bind(acc_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list dictionary links", e)
        })
    }

    /// Replace all dictionary links under one key category with a new set.
    pub async fn replace_dictionaries(
        &self,
        acc_id: i64,
        key: DictionaryKey,
        dictionary_ids: &[i64],
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query(
            "UPDATE acc_dictionary ad SET is_deleted = TRUE, updated_at = NOW() \
             FROM dictionaries d \
             WHERE ad.dictionary_id = d.id AND ad.acc_id = $1 AND d.key = $2 \
               AND ad.is_deleted = FALSE",
        )
        .bind(acc_id)
        .bind(key)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to clear dictionary links", e)
        })?;

        for dictionary_id in dictionary_ids {
            sqlx::query("INSERT INTO acc_dictionary (acc_id, dictionary_id) VALUES ($1, $2)")
                .bind(acc_id)
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

fn push_filters(qb: &mut QueryBuilder<Postgres>, filter: &AccommodationFilter) {
    qb.push(" WHERE is_deleted = FALSE");
    if let Some(city_id) = filter.city_id {
        qb.push(" AND city_id = ");
        qb.push_bind(city_id);
    }
    if let Some(district_id) = filter.district_id {
        qb.push(" AND district_id = ");
        qb.push_bind(district_id);
    }
    if let Some(approved) = filter.approved {
        qb.push(" AND is_approved = ");
        qb.push_bind(approved);
    }
    if let Some(owner_id) = filter.owner_id {
        qb.push(" AND owner_id = ");
        qb.push_bind(owner_id);
    }
    if let Some(min_rating) = filter.min_rating {
        qb.push(" AND rating >= ");
        qb.push_bind(min_rating);
    }
    if let Some(ref name) = filter.name {
        qb.push(" AND name ILIKE ");
        qb.push_bind(format!("%{name}%"));
    }
}
