//! Search request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::SearchRequestStatus;
use crate::unit::UnitType;

/// A client's published request for accommodation offers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SearchRequest {
    /// Unique search request identifier.
    pub id: i64,
    /// Authoring user.
    pub author_id: i64,
    /// Minimum acceptable accommodation rating.
    pub from_rating: Option<f64>,
    /// Maximum accommodation rating.
    pub to_rating: Option<f64>,
    /// Desired stay start.
    pub from_date: Option<DateTime<Utc>>,
    /// Desired stay end.
    pub to_date: Option<DateTime<Utc>>,
    /// Whether this is a single-night stay.
    pub one_night: Option<bool>,
    /// Budget the client is willing to pay.
    pub price: f64,
    /// Number of guests.
    pub count_of_people: Option<i32>,
    /// Lifecycle status.
    pub status: SearchRequestStatus,
    /// When the request stops accepting offers.
    pub expires_at: DateTime<Utc>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the request was last updated.
    pub updated_at: DateTime<Utc>,
}

impl SearchRequest {
    /// Whether the request has passed its expiry time.
    pub fn is_expired_by(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_terminal() && now >= self.expires_at
    }
}

/// Data required to publish a new search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSearchRequest {
    /// Authoring user.
    pub author_id: i64,
    /// Minimum acceptable accommodation rating.
    pub from_rating: Option<f64>,
    /// Maximum accommodation rating.
    pub to_rating: Option<f64>,
    /// Desired stay start.
    pub from_date: Option<DateTime<Utc>>,
    /// Desired stay end.
    pub to_date: Option<DateTime<Utc>>,
    /// Whether this is a single-night stay.
    pub one_night: Option<bool>,
    /// Budget the client is willing to pay.
    pub price: f64,
    /// Number of guests.
    pub count_of_people: Option<i32>,
    /// Acceptable unit types.
    pub unit_types: Vec<UnitType>,
    /// Desired conditions and services.
    pub dictionary_ids: Vec<i64>,
    /// Acceptable districts.
    pub district_ids: Vec<i64>,
}

/// Links a search request to an acceptable unit type.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SearchRequestUnitType {
    /// Unique link identifier.
    pub id: i64,
    /// Owning search request.
    pub search_request_id: i64,
    /// Acceptable unit type.
    pub unit_type: UnitType,
}

/// Links a search request to a desired dictionary entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SearchRequestDictionary {
    /// Unique link identifier.
    pub id: i64,
    /// Owning search request.
    pub search_request_id: i64,
    /// Desired dictionary entry.
    pub dictionary_id: i64,
}

/// Links a search request to an acceptable district.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SearchRequestDistrict {
    /// Unique link identifier.
    pub id: i64,
    /// Owning search request.
    pub search_request_id: i64,
    /// Acceptable district.
    pub district_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(status: SearchRequestStatus, expires_in: Duration) -> SearchRequest {
        let now = Utc::now();
        SearchRequest {
            id: 1,
            author_id: 1,
            from_rating: None,
            to_rating: None,
            from_date: None,
            to_date: None,
            one_night: Some(true),
            price: 15000.0,
            count_of_people: Some(2),
            status,
            expires_at: now + expires_in,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_expiry_applies_only_to_active_requests() {
        let now = Utc::now();
        let overdue = sample(SearchRequestStatus::OpenToPriceRequest, Duration::minutes(-1));
        assert!(overdue.is_expired_by(now));

        let fresh = sample(SearchRequestStatus::OpenToPriceRequest, Duration::minutes(10));
        assert!(!fresh.is_expired_by(now));

        let finished = sample(SearchRequestStatus::Finished, Duration::minutes(-1));
        assert!(!finished.is_expired_by(now));
    }
}
