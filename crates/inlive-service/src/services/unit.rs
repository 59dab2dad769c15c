//! Unit management inside an accommodation.
//!
//! Ownership is resolved through the parent accommodation: whoever owns
//! the accommodation manages its units, tariffs and photos.

use serde::Serialize;
use tracing::info;

use inlive_core::types::pagination::{PageRequest, PageResponse};
use inlive_core::{AppError, AppResult};
use inlive_database::repositories::{
    AccommodationRepository, DictionaryRepository, PriceRequestRepository, ReservationRepository,
    SearchRequestRepository, UnitFilter, UnitRepository,
};
use inlive_entity::dictionary::{Dictionary, DictionaryKey};
use inlive_entity::price_request::PriceRequest;
use inlive_entity::reservation::Reservation;
use inlive_entity::search_request::SearchRequest;
use inlive_entity::unit::{
    AccommodationUnit, CreateUnit, RangeType, UnitImage, UnitTariff, UpdateUnit,
};
use inlive_file_client::upload::IMAGE_CONTENT_TYPES;
use inlive_file_client::{FileManagerClient, UploadFile};

use crate::context::RequestContext;
use crate::services::ensure_dictionary_entries;

/// Currency applied to tariffs created without one.
const DEFAULT_CURRENCY: &str = "KZT";

/// A unit with its attachments resolved.
#[derive(Debug, Clone, Serialize)]
pub struct UnitDetails {
    #[serde(flatten)]
    pub unit: AccommodationUnit,
    pub images: Vec<UnitImage>,
    pub tariffs: Vec<UnitTariff>,
    pub dictionaries: Vec<Dictionary>,
}

#[derive(Clone)]
pub struct UnitService {
    units: UnitRepository,
    accommodations: AccommodationRepository,
    dictionaries: DictionaryRepository,
    search_requests: SearchRequestRepository,
    price_requests: PriceRequestRepository,
    reservations: ReservationRepository,
    files: FileManagerClient,
}

impl UnitService {
    pub fn new(
        units: UnitRepository,
        accommodations: AccommodationRepository,
        dictionaries: DictionaryRepository,
        search_requests: SearchRequestRepository,
        price_requests: PriceRequestRepository,
        reservations: ReservationRepository,
        files: FileManagerClient,
    ) -> Self {
        Self {
            units,
            accommodations,
            dictionaries,
            search_requests,
            price_requests,
            reservations,
            files,
        }
    }

    /// Add a unit to an accommodation the caller owns.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateUnit,
        photos: Vec<UploadFile>,
    ) -> AppResult<AccommodationUnit> {
        let accommodation = self
            .accommodations
            .find_by_id(data.acc_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Accommodation {} not found", data.acc_id))
            })?;
        ctx.require_owner(accommodation.owner_id)?;

        ensure_dictionary_entries(
            &self.dictionaries,
            &data.dictionary_ids,
            &[DictionaryKey::UnitCondition],
        )
        .await?;

        let max_size = self.files.config().max_file_size_bytes;
        for photo in &photos {
            photo.validate(IMAGE_CONTENT_TYPES, max_size)?;
        }

        let directory = self.files.config().unit_photos_dir.clone();
        let image_urls = self.files.upload_files(&directory, photos, true).await?;

        let unit = self.units.create(&data, &image_urls).await?;
        info!(id = unit.id, acc_id = unit.acc_id, "unit created");
        Ok(unit)
    }

    /// Fetch a unit with its images, tariffs and tags.
    pub async fn details(&self, id: i64) -> AppResult<UnitDetails> {
        let unit = self.get(id).await?;
        let images = self.units.find_images(id).await?;
        let tariffs = self.units.find_tariffs(id).await?;

        let links = self.units.find_dictionaries(id).await?;
        let ids: Vec<i64> = links.iter().map(|l| l.dictionary_id).collect();
        let dictionaries = self.dictionaries.find_by_ids(&ids).await?;

        Ok(UnitDetails {
            unit,
            images,
            tariffs,
            dictionaries,
        })
    }

    /// List units matching the filter, paginated.
    pub async fn search(
        &self,
        filter: &UnitFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AccommodationUnit>> {
        self.units.search(filter, page).await
    }

    /// Update a unit's editable fields. Owner only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        data: UpdateUnit,
    ) -> AppResult<AccommodationUnit> {
        self.owned_unit(ctx, id).await?;
        self.units.update(id, &data).await
    }

    /// Soft-delete a unit. Owner only.
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        self.owned_unit(ctx, id).await?;
        self.units.soft_delete(id).await?;
        info!(id, "unit deleted");
        Ok(())
    }

    /// Replace the unit-condition tags. Owner only.
    pub async fn update_dictionaries(
        &self,
        ctx: &RequestContext,
        id: i64,
        dictionary_ids: Vec<i64>,
    ) -> AppResult<()> {
        let unit = self.owned_unit(ctx, id).await?;

        ensure_dictionary_entries(
            &self.dictionaries,
            &dictionary_ids,
            &[DictionaryKey::UnitCondition],
        )
        .await?;

        self.units
            .replace_dictionaries(unit.acc_id, id, &dictionary_ids)
            .await
    }

    /// Add a tariff for a unit. Owner only.
    pub async fn add_tariff(
        &self,
        ctx: &RequestContext,
        id: i64,
        price: f64,
        currency: Option<String>,
        range_type: RangeType,
    ) -> AppResult<UnitTariff> {
        if price <= 0.0 {
            return Err(AppError::validation("Tariff price must be positive"));
        }
        let unit = self.owned_unit(ctx, id).await?;

        let currency = currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        self.units
            .add_tariff(unit.acc_id, id, price, &currency, range_type)
            .await
    }

    /// Active search requests this unit could satisfy. Owner only.
    pub async fn relevant_requests(
        &self,
        ctx: &RequestContext,
        id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SearchRequest>> {
        self.owned_unit(ctx, id).await?;
        self.search_requests.find_relevant_for_unit(id, page).await
    }

    /// Price offers sent from this unit. Owner only.
    pub async fn price_requests(
        &self,
        ctx: &RequestContext,
        id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<PriceRequest>> {
        self.owned_unit(ctx, id).await?;
        self.price_requests.find_by_unit(id, page).await
    }

    /// Reservations on this unit still awaiting a verdict. Owner only.
    pub async fn pending_reservations(
        &self,
        ctx: &RequestContext,
        id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        self.owned_unit(ctx, id).await?;
        self.reservations.find_pending_by_unit(id, page).await
    }

    /// Fetch a single unit.
    pub async fn get(&self, id: i64) -> AppResult<AccommodationUnit> {
        self.units
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Unit {id} not found")))
    }

    /// Load a unit and verify the caller owns its accommodation.
    async fn owned_unit(&self, ctx: &RequestContext, id: i64) -> AppResult<AccommodationUnit> {
        let unit = self.get(id).await?;
        let accommodation = self
            .accommodations
            .find_by_id(unit.acc_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Accommodation {} not found", unit.acc_id))
            })?;
        ctx.require_owner(accommodation.owner_id)?;
        Ok(unit)
    }
}
