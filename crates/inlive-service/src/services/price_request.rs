//! Price offer workflow between accommodation owners and request authors.
//!
//! Owners submit offers against active search requests; the request's
//! author answers each offer. Accepting one creates the reservation and
//! moves the search request forward.

use tracing::info;

use inlive_core::types::pagination::{PageRequest, PageResponse};
use inlive_core::{AppError, AppResult};
use inlive_database::repositories::{
    AccommodationRepository, PriceRequestRepository, ReservationRepository,
    SearchRequestRepository, UnitRepository,
};
use inlive_entity::price_request::{
    ClientResponseStatus, CreatePriceRequest, PriceRequest, PriceRequestStatus,
};
use inlive_entity::reservation::CreateReservation;
use inlive_entity::search_request::SearchRequestStatus;

use crate::context::RequestContext;

#[derive(Clone)]
pub struct PriceRequestService {
    price_requests: PriceRequestRepository,
    search_requests: SearchRequestRepository,
    units: UnitRepository,
    accommodations: AccommodationRepository,
    reservations: ReservationRepository,
}

impl PriceRequestService {
    pub fn new(
        price_requests: PriceRequestRepository,
        search_requests: SearchRequestRepository,
        units: UnitRepository,
        accommodations: AccommodationRepository,
        reservations: ReservationRepository,
    ) -> Self {
        Self {
            price_requests,
            search_requests,
            units,
            accommodations,
            reservations,
        }
    }

    /// Submit an offer from a unit against a search request. Unit owner
    /// only; one active offer per unit and request.
    ///
    /// An offer matching the requested budget is recorded as accepted, any
    /// other price as a counter-offer.
    pub async fn create(&self, ctx: &RequestContext, data: CreatePriceRequest) -> AppResult<PriceRequest> {
        if data.price <= 0.0 {
            return Err(AppError::validation("Offer price must be positive"));
        }

        let search_request = self
            .search_requests
            .find_by_id(data.search_request_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Search request {} not found",
                    data.search_request_id
                ))
            })?;
        if !search_request.status.accepts_price_requests() {
            return Err(AppError::conflict(format!(
                "Search request {} no longer accepts offers",
                search_request.id
            )));
        }

        self.require_unit_owner(ctx, data.acc_unit_id).await?;

        if self
            .price_requests
            .exists_for_pair(data.search_request_id, data.acc_unit_id)
            .await?
        {
            return Err(AppError::conflict(
                "An offer for this unit already exists",
            ));
        }

        let status = if matches_asking_price(data.price, search_request.price) {
            PriceRequestStatus::Accepted
        } else {
            PriceRequestStatus::CounterOffer
        };
        let offer = self.price_requests.create(&data, status).await?;

        if search_request.status == SearchRequestStatus::OpenToPriceRequest {
            self.search_requests
                .update_status(search_request.id, SearchRequestStatus::PriceRequestPending)
                .await?;
        }

        info!(
            id = offer.id,
            search_request_id = offer.search_request_id,
            unit_id = offer.acc_unit_id,
            status = %offer.status,
            "price offer submitted"
        );
        Ok(offer)
    }

    /// Revise an offer's price. Unit owner only. The client's earlier
    /// response is discarded and the revised offer awaits a new one.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        price: f64,
    ) -> AppResult<PriceRequest> {
        if price <= 0.0 {
            return Err(AppError::validation("Offer price must be positive"));
        }

        let offer = self.get(id).await?;
        self.require_unit_owner(ctx, offer.acc_unit_id).await?;

        let search_request = self
            .search_requests
            .find_by_id(offer.search_request_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Search request {} not found",
                    offer.search_request_id
                ))
            })?;
        if !search_request.status.accepts_price_requests() {
            return Err(AppError::conflict(format!(
                "Search request {} no longer accepts offers",
                search_request.id
            )));
        }

        let status = if matches_asking_price(price, search_request.price) {
            PriceRequestStatus::Accepted
        } else {
            PriceRequestStatus::CounterOffer
        };
        self.price_requests.update(id, status, price).await
    }

    /// Withdraw an offer. Unit owner only.
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        let offer = self.get(id).await?;
        self.require_unit_owner(ctx, offer.acc_unit_id).await?;

        self.price_requests.soft_delete(id).await?;
        info!(id, "price offer withdrawn");
        Ok(())
    }

    /// Fetch a single offer.
    pub async fn get(&self, id: i64) -> AppResult<PriceRequest> {
        self.price_requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Price request {id} not found")))
    }

    /// List offers sent from a unit, paginated.
    pub async fn by_unit(
        &self,
        unit_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<PriceRequest>> {
        self.units
            .find_by_id(unit_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Unit {unit_id} not found")))?;
        self.price_requests.find_by_unit(unit_id, page).await
    }

    /// List offers against a search request, paginated.
    pub async fn by_search_request(
        &self,
        search_request_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<PriceRequest>> {
        self.search_requests
            .find_by_id(search_request_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Search request {search_request_id} not found"))
            })?;
        self.price_requests
            .find_by_search_request(search_request_id, page)
            .await
    }

    /// Record the author's answer to an offer.
    ///
    /// Accepting creates the reservation (if one does not already exist for
    /// this offer) and moves the search request to waiting for approval.
    pub async fn respond(
        &self,
        ctx: &RequestContext,
        id: i64,
        response: ClientResponseStatus,
    ) -> AppResult<PriceRequest> {
        if response == ClientResponseStatus::Waiting {
            return Err(AppError::validation(
                "Response must be either ACCEPTED or REJECTED",
            ));
        }

        let offer = self.get(id).await?;
        let search_request = self
            .search_requests
            .find_by_id(offer.search_request_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Search request {} not found",
                    offer.search_request_id
                ))
            })?;

        if search_request.author_id != ctx.user_id {
            return Err(AppError::forbidden(
                "You can only respond to price requests for your own search requests",
            ));
        }
        if !offer.client_response_status.is_pending() {
            return Err(AppError::conflict(format!(
                "This offer was already answered with {}",
                offer.client_response_status
            )));
        }

        let offer = self.price_requests.set_client_response(id, response).await?;

        if response == ClientResponseStatus::Accepted {
            if !self.reservations.exists_for_price_request(offer.id).await? {
                let reservation = self
                    .reservations
                    .create(&CreateReservation {
                        client_id: search_request.author_id,
                        acc_unit_id: offer.acc_unit_id,
                        price_request_id: offer.id,
                        search_request_id: search_request.id,
                    })
                    .await?;
                info!(
                    reservation_id = reservation.id,
                    price_request_id = offer.id,
                    "reservation created from accepted offer"
                );
            }
            self.search_requests
                .update_status(search_request.id, SearchRequestStatus::WaitToReservation)
                .await?;
        }

        info!(id = offer.id, response = %response, "price offer answered");
        Ok(offer)
    }

    /// Verify the caller owns the accommodation the unit belongs to.
    async fn require_unit_owner(&self, ctx: &RequestContext, unit_id: i64) -> AppResult<()> {
        let unit = self
            .units
            .find_by_id(unit_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Unit {unit_id} not found")))?;
        let accommodation = self
            .accommodations
            .find_by_id(unit.acc_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Accommodation {} not found", unit.acc_id))
            })?;
        ctx.require_owner(accommodation.owner_id)
    }
}

/// Whether an offered price equals the request's budget. Prices are
/// compared in minor currency units, not by exact float equality.
fn matches_asking_price(offered: f64, asking: f64) -> bool {
    (offered * 100.0).round() == (asking * 100.0).round()
}

#[cfg(test)]
mod tests {
    use super::matches_asking_price;

    #[test]
    fn test_price_comparison_tolerates_float_noise() {
        assert!(matches_asking_price(0.1 + 0.2, 0.3));
        assert!(matches_asking_price(15000.0, 15000.0));
        assert!(!matches_asking_price(14999.99, 15000.0));
        assert!(!matches_asking_price(15000.5, 15000.0));
    }
}
