//! Reservation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::ReservationStatus;

/// A reservation created when a client accepts a price offer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    /// Unique reservation identifier.
    pub id: i64,
    /// The client holding the reservation.
    pub client_id: i64,
    /// Reserved unit.
    pub acc_unit_id: i64,
    /// The accepted price offer.
    pub price_request_id: i64,
    /// The originating search request.
    pub search_request_id: i64,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Whether payment is still outstanding.
    pub is_need_to_pay: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
    /// When the reservation was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservation {
    /// The client holding the reservation.
    pub client_id: i64,
    /// Reserved unit.
    pub acc_unit_id: i64,
    /// The accepted price offer.
    pub price_request_id: i64,
    /// The originating search request.
    pub search_request_id: i64,
}
