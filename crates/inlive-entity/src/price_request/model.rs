//! Price request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::{ClientResponseStatus, PriceRequestStatus};

/// An accommodation owner's price offer against a search request.
///
/// Unique per (search request, unit) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PriceRequest {
    /// Unique price request identifier.
    pub id: i64,
    /// Search request this offer responds to.
    pub search_request_id: i64,
    /// Unit being offered.
    pub acc_unit_id: i64,
    /// Offered price.
    pub price: f64,
    /// Offer status from the accommodation side.
    pub status: PriceRequestStatus,
    /// Client's response to the offer.
    pub client_response_status: ClientResponseStatus,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the offer was created.
    pub created_at: DateTime<Utc>,
    /// When the offer was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to submit a new price offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePriceRequest {
    /// Search request this offer responds to.
    pub search_request_id: i64,
    /// Unit being offered.
    pub acc_unit_id: i64,
    /// Offered price.
    pub price: f64,
}
