//! Accommodation listing management.
//!
//! Creation and editing are owner operations; moderation verdicts are
//! admin-only. Photos and documents live in the external file manager and
//! are referenced here by URL.

use serde::Serialize;
use tracing::{info, warn};

use inlive_core::types::pagination::{PageRequest, PageResponse};
use inlive_core::{AppError, AppResult};
use inlive_database::repositories::{
    AccommodationFilter, AccommodationRepository, CityRepository, DictionaryRepository,
    DistrictRepository, SearchRequestRepository,
};
use inlive_entity::accommodation::{
    Accommodation, AccommodationDocument, AccommodationImage, CreateAccommodation,
    UpdateAccommodation,
};
use inlive_entity::dictionary::{Dictionary, DictionaryKey};
use inlive_entity::search_request::SearchRequest;
use inlive_file_client::upload::{DOCUMENT_CONTENT_TYPES, IMAGE_CONTENT_TYPES};
use inlive_file_client::{extract_filename, FileManagerClient, UploadFile};

use crate::context::RequestContext;
use crate::services::ensure_dictionary_entries;

/// Key categories an accommodation can be tagged with.
const ACCOMMODATION_KEYS: &[DictionaryKey] =
    &[DictionaryKey::AccCondition, DictionaryKey::AccService];

/// An accommodation with its attachments resolved.
#[derive(Debug, Clone, Serialize)]
pub struct AccommodationDetails {
    #[serde(flatten)]
    pub accommodation: Accommodation,
    pub images: Vec<AccommodationImage>,
    pub documents: Vec<AccommodationDocument>,
    pub dictionaries: Vec<Dictionary>,
}

#[derive(Clone)]
pub struct AccommodationService {
    accommodations: AccommodationRepository,
    cities: CityRepository,
    districts: DistrictRepository,
    dictionaries: DictionaryRepository,
    search_requests: SearchRequestRepository,
    files: FileManagerClient,
}

impl AccommodationService {
    pub fn new(
        accommodations: AccommodationRepository,
        cities: CityRepository,
        districts: DistrictRepository,
        dictionaries: DictionaryRepository,
        search_requests: SearchRequestRepository,
        files: FileManagerClient,
    ) -> Self {
        Self {
            accommodations,
            cities,
            districts,
            dictionaries,
            search_requests,
            files,
        }
    }

    /// Publish a new accommodation owned by the caller.
    ///
    /// Photos and ownership documents are uploaded before the row is
    /// written; the listing stays invisible until an admin approves it.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut data: CreateAccommodation,
        photos: Vec<UploadFile>,
        documents: Vec<UploadFile>,
    ) -> AppResult<Accommodation> {
        data.owner_id = ctx.user_id;

        self.ensure_location(data.city_id, data.district_id).await?;
        ensure_dictionary_entries(&self.dictionaries, &data.dictionary_ids, ACCOMMODATION_KEYS)
            .await?;

        let max_size = self.files.config().max_file_size_bytes;
        for photo in &photos {
            photo.validate(IMAGE_CONTENT_TYPES, max_size)?;
        }
        for document in &documents {
            document.validate(DOCUMENT_CONTENT_TYPES, max_size)?;
        }

        let photos_dir = self.files.config().accommodation_photos_dir.clone();
        let documents_dir = self.files.config().accommodation_documents_dir.clone();

        let document_types: Vec<String> =
            documents.iter().map(|d| d.content_type.clone()).collect();

        let image_urls = self.files.upload_files(&photos_dir, photos, true).await?;
        let document_urls = self
            .files
            .upload_files(&documents_dir, documents, true)
            .await?;

        let accommodation = self.accommodations.create(&data, &image_urls).await?;

        for (url, document_type) in document_urls.iter().zip(document_types.iter()) {
            self.accommodations
                .add_document(accommodation.id, url, document_type)
                .await?;
        }

        info!(
            id = accommodation.id,
            owner_id = ctx.user_id,
            "accommodation created, pending moderation"
        );
        Ok(accommodation)
    }

    /// Fetch an accommodation with its images, documents and tags.
    pub async fn details(&self, id: i64) -> AppResult<AccommodationDetails> {
        let accommodation = self.get(id).await?;
        let images = self.accommodations.find_images(id).await?;
        let documents = self.accommodations.find_documents(id).await?;

        let links = self.accommodations.find_dictionaries(id).await?;
        let ids: Vec<i64> = links.iter().map(|l| l.dictionary_id).collect();
        let dictionaries = self.dictionaries.find_by_ids(&ids).await?;

        Ok(AccommodationDetails {
            accommodation,
            images,
            documents,
            dictionaries,
        })
    }

    /// List accommodations matching the filter, paginated.
    pub async fn search(
        &self,
        filter: &AccommodationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Accommodation>> {
        self.accommodations.search(filter, page).await
    }

    /// List the caller's own accommodations, paginated.
    pub async fn owner_listings(
        &self,
        ctx: &RequestContext,
        mut filter: AccommodationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Accommodation>> {
        filter.owner_id = Some(ctx.user_id);
        self.accommodations.search(&filter, page).await
    }

    /// Update address, name, description or location. Owner only.
    pub async fn update_main_info(
        &self,
        ctx: &RequestContext,
        id: i64,
        data: UpdateAccommodation,
    ) -> AppResult<Accommodation> {
        let accommodation = self.get(id).await?;
        ctx.require_owner(accommodation.owner_id)?;

        if data.city_id.is_some() || data.district_id.is_some() {
            let city_id = data.city_id.unwrap_or(accommodation.city_id);
            let district_id = data.district_id.unwrap_or(accommodation.district_id);
            self.ensure_location(city_id, district_id).await?;
        }

        self.accommodations.update(id, &data).await
    }

    /// Replace the tags under one key category. Owner only.
    pub async fn update_dictionaries(
        &self,
        ctx: &RequestContext,
        id: i64,
        key: DictionaryKey,
        dictionary_ids: Vec<i64>,
    ) -> AppResult<()> {
        if !ACCOMMODATION_KEYS.contains(&key) {
            return Err(AppError::validation(format!(
                "Category {key} does not apply to accommodations"
            )));
        }

        let accommodation = self.get(id).await?;
        ctx.require_owner(accommodation.owner_id)?;

        ensure_dictionary_entries(&self.dictionaries, &dictionary_ids, &[key]).await?;
        self.accommodations
            .replace_dictionaries(id, key, &dictionary_ids)
            .await
    }

    /// Upload and attach more photos. Owner only.
    pub async fn update_photos(
        &self,
        ctx: &RequestContext,
        id: i64,
        photos: Vec<UploadFile>,
    ) -> AppResult<Vec<AccommodationImage>> {
        let accommodation = self.get(id).await?;
        ctx.require_owner(accommodation.owner_id)?;

        let max_size = self.files.config().max_file_size_bytes;
        for photo in &photos {
            photo.validate(IMAGE_CONTENT_TYPES, max_size)?;
        }

        if !photos.is_empty() {
            let directory = self.files.config().accommodation_photos_dir.clone();
            let urls = self.files.upload_files(&directory, photos, true).await?;
            self.accommodations.add_images(id, &urls).await?;
        }

        self.accommodations.find_images(id).await
    }

    /// Detach the photos matching the given URLs and remove them from
    /// storage. Owner only.
    ///
    /// A photo stays attached when the file manager fails to remove its
    /// file; the call errors only when nothing was deleted at all.
    pub async fn delete_photos(
        &self,
        ctx: &RequestContext,
        id: i64,
        photo_urls: Vec<String>,
    ) -> AppResult<()> {
        let accommodation = self.get(id).await?;
        ctx.require_owner(accommodation.owner_id)?;

        let urls: Vec<&str> = photo_urls
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .collect();
        if urls.is_empty() {
            return Err(AppError::validation("No photo URLs provided"));
        }

        let images = self.accommodations.find_images(id).await?;
        let matched: Vec<AccommodationImage> = images
            .into_iter()
            .filter(|i| {
                urls.iter()
                    .any(|u| i.image_url.contains(u) || u.contains(i.image_url.as_str()))
            })
            .collect();
        if matched.is_empty() {
            return Err(AppError::not_found("No matching photos found"));
        }

        let directory = &self.files.config().accommodation_photos_dir;
        let mut deleted = 0;
        for image in matched {
            let filename = extract_filename(&image.image_url);
            if let Err(e) = self.files.delete_file(directory, filename).await {
                warn!(image_id = image.id, error = %e, "failed to remove accommodation photo from storage");
                continue;
            }
            self.accommodations.remove_image(image.id).await?;
            deleted += 1;
        }

        if deleted == 0 {
            return Err(AppError::internal("Failed to delete the requested photos"));
        }
        info!(id, deleted, "accommodation photos deleted");
        Ok(())
    }

    /// Soft-delete an accommodation. Owner only.
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        let accommodation = self.get(id).await?;
        ctx.require_owner(accommodation.owner_id)?;

        self.accommodations.soft_delete(id).await?;
        info!(id, "accommodation deleted");
        Ok(())
    }

    /// Approve a pending listing. Admin only.
    pub async fn approve(&self, ctx: &RequestContext, id: i64) -> AppResult<Accommodation> {
        self.moderate(ctx, id, true).await
    }

    /// Reject a pending listing. Admin only.
    pub async fn reject(&self, ctx: &RequestContext, id: i64) -> AppResult<Accommodation> {
        self.moderate(ctx, id, false).await
    }

    /// Active search requests any of this accommodation's units could
    /// satisfy. Owner only.
    pub async fn relevant_requests(
        &self,
        ctx: &RequestContext,
        id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SearchRequest>> {
        let accommodation = self.get(id).await?;
        ctx.require_owner(accommodation.owner_id)?;

        self.search_requests
            .find_relevant_for_accommodation(id, page)
            .await
    }

    /// Fetch a single accommodation.
    pub async fn get(&self, id: i64) -> AppResult<Accommodation> {
        self.accommodations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Accommodation {id} not found")))
    }

    async fn moderate(
        &self,
        ctx: &RequestContext,
        id: i64,
        approved: bool,
    ) -> AppResult<Accommodation> {
        ctx.require_admin()?;

        let accommodation = self
            .accommodations
            .set_approval(id, approved, ctx.user_id)
            .await?;
        info!(id, approved, moderator = ctx.user_id, "moderation verdict recorded");
        Ok(accommodation)
    }

    /// Verify the city exists and the district belongs to it.
    async fn ensure_location(&self, city_id: i64, district_id: i64) -> AppResult<()> {
        self.cities
            .find_by_id(city_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("City {city_id} not found")))?;

        let district = self
            .districts
            .find_by_id(district_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("District {district_id} not found")))?;

        if district.city_id != city_id {
            return Err(AppError::validation(format!(
                "District {district_id} does not belong to city {city_id}"
            )));
        }
        Ok(())
    }
}
