//! Reservation lifecycle: creation from an accepted offer, the owner's
//! verdict, the final outcome of the stay, and client cancellation.

use chrono::{Duration, Utc};
use tracing::info;

use inlive_core::types::pagination::{PageRequest, PageResponse};
use inlive_core::{AppError, AppResult};
use inlive_database::repositories::{
    AccommodationRepository, PriceRequestRepository, ReservationRepository,
    SearchRequestRepository, UnitRepository,
};
use inlive_entity::price_request::ClientResponseStatus;
use inlive_entity::reservation::{CreateReservation, Reservation, ReservationStatus};
use inlive_entity::search_request::SearchRequestStatus;

use crate::context::RequestContext;

/// How long before check-in a client may still cancel.
const CANCELLATION_CUTOFF: Duration = Duration::days(1);

#[derive(Clone)]
pub struct ReservationService {
    reservations: ReservationRepository,
    price_requests: PriceRequestRepository,
    search_requests: SearchRequestRepository,
    units: UnitRepository,
    accommodations: AccommodationRepository,
}

impl ReservationService {
    pub fn new(
        reservations: ReservationRepository,
        price_requests: PriceRequestRepository,
        search_requests: SearchRequestRepository,
        units: UnitRepository,
        accommodations: AccommodationRepository,
    ) -> Self {
        Self {
            reservations,
            price_requests,
            search_requests,
            units,
            accommodations,
        }
    }

    /// Create a reservation from an offer the author already accepted.
    ///
    /// Normally the reservation appears automatically when the offer is
    /// accepted; this covers the case where that step did not complete.
    pub async fn create(&self, ctx: &RequestContext, price_request_id: i64) -> AppResult<Reservation> {
        let offer = self
            .price_requests
            .find_by_id(price_request_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Price request {price_request_id} not found"))
            })?;

        if offer.client_response_status != ClientResponseStatus::Accepted {
            return Err(AppError::validation(
                "Only an accepted offer can be reserved",
            ));
        }

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
                "Only the search request author can reserve this offer",
            ));
        }

        if self
            .reservations
            .exists_for_price_request(price_request_id)
            .await?
        {
            return Err(AppError::conflict(
                "A reservation for this offer already exists",
            ));
        }

        let reservation = self
            .reservations
            .create(&CreateReservation {
                client_id: search_request.author_id,
                acc_unit_id: offer.acc_unit_id,
                price_request_id: offer.id,
                search_request_id: search_request.id,
            })
            .await?;

        self.search_requests
            .update_status(search_request.id, SearchRequestStatus::WaitToReservation)
            .await?;

        info!(
            id = reservation.id,
            price_request_id,
            "reservation created"
        );
        Ok(reservation)
    }

    /// Record the owner's verdict on a pending reservation.
    ///
    /// Approval finishes the underlying search request; rejection reopens
    /// its offer selection.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        id: i64,
        status: ReservationStatus,
    ) -> AppResult<Reservation> {
        if !matches!(
            status,
            ReservationStatus::Approved | ReservationStatus::Rejected
        ) {
            return Err(AppError::validation(
                "Verdict must be either APPROVED or REJECTED",
            ));
        }

        let reservation = self.get(id).await?;
        self.require_unit_owner(ctx, reservation.acc_unit_id).await?;

        if !reservation.status.is_decidable() {
            return Err(AppError::conflict(format!(
                "Reservation is already {}",
                reservation.status
            )));
        }

        let reservation = self.reservations.update_status(id, status).await?;

        let next = match status {
            ReservationStatus::Approved => SearchRequestStatus::Finished,
            _ => SearchRequestStatus::PriceRequestPending,
        };
        self.search_requests
            .update_status(reservation.search_request_id, next)
            .await?;

        info!(id, status = %status, "reservation verdict recorded");
        Ok(reservation)
    }

    /// Record how an approved stay ended.
    pub async fn final_status(
        &self,
        ctx: &RequestContext,
        id: i64,
        status: ReservationStatus,
    ) -> AppResult<Reservation> {
        if !matches!(
            status,
            ReservationStatus::Successful
                | ReservationStatus::FinishedSuccessful
                | ReservationStatus::ClientDidntCame
        ) {
            return Err(AppError::validation(
                "Final status must be SUCCESSFUL, FINISHED_SUCCESSFUL or CLIENT_DIDNT_CAME",
            ));
        }

        let reservation = self.get(id).await?;
        self.require_unit_owner(ctx, reservation.acc_unit_id).await?;

        if !reservation.status.can_transition_to(status) {
            return Err(AppError::conflict(format!(
                "Cannot move a {} reservation to {}",
                reservation.status, status
            )));
        }

        let reservation = self.reservations.update_status(id, status).await?;
        info!(id, status = %status, "reservation closed");
        Ok(reservation)
    }

    /// Cancel a reservation the caller holds. Allowed while the stay is
    /// more than a day away.
    pub async fn cancel(&self, ctx: &RequestContext, id: i64) -> AppResult<Reservation> {
        let reservation = self.get(id).await?;
        if reservation.client_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the reservation holder can cancel it",
            ));
        }
        if !reservation
            .status
            .can_transition_to(ReservationStatus::Canceled)
        {
            return Err(AppError::conflict(format!(
                "A {} reservation cannot be cancelled",
                reservation.status
            )));
        }

        let search_request = self
            .search_requests
            .find_by_id(reservation.search_request_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Search request {} not found",
                    reservation.search_request_id
                ))
            })?;
        if let Some(from_date) = search_request.from_date {
            if Utc::now() >= from_date - CANCELLATION_CUTOFF {
                return Err(AppError::validation(
                    "Reservations can be cancelled no later than one day before check-in",
                ));
            }
        }

        let reservation = self
            .reservations
            .update_status(id, ReservationStatus::Canceled)
            .await?;
        info!(id, client_id = ctx.user_id, "reservation cancelled");
        Ok(reservation)
    }

    /// Fetch a single reservation.
    pub async fn get(&self, id: i64) -> AppResult<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))
    }

    /// List reservations on a unit. Unit owner only.
    pub async fn by_unit(
        &self,
        ctx: &RequestContext,
        unit_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        self.require_unit_owner(ctx, unit_id).await?;
        self.reservations.find_by_unit(unit_id, page).await
    }

    /// List reservations across an accommodation. Owner only.
    pub async fn by_accommodation(
        &self,
        ctx: &RequestContext,
        acc_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        let accommodation = self
            .accommodations
            .find_by_id(acc_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Accommodation {acc_id} not found")))?;
        ctx.require_owner(accommodation.owner_id)?;

        self.reservations.find_by_accommodation(acc_id, page).await
    }

    /// List reservations behind a search request. Author only.
    pub async fn by_search_request(
        &self,
        ctx: &RequestContext,
        search_request_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        let search_request = self
            .search_requests
            .find_by_id(search_request_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Search request {search_request_id} not found"))
            })?;
        ctx.require_owner(search_request.author_id)?;

        self.reservations
            .find_by_search_request(search_request_id, page)
            .await
    }

    /// List the caller's own reservations, paginated.
    pub async fn my(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        self.reservations.find_by_client(ctx.user_id, page).await
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
