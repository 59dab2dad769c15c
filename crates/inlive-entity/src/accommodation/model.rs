//! Accommodation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A property listed on the marketplace.
///
/// `approved` is a tri-state: `None` while moderation is pending,
/// `Some(true)` once an admin approves, `Some(false)` on rejection.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Accommodation {
    /// Unique accommodation identifier.
    pub id: i64,
    /// City the property is located in.
    pub city_id: i64,
    /// District the property is located in.
    pub district_id: i64,
    /// Owning user.
    pub owner_id: i64,
    /// Street address.
    pub address: String,
    /// Listing name.
    pub name: String,
    /// Listing description.
    pub description: String,
    /// Aggregate rating.
    pub rating: f64,
    /// Moderation verdict, `None` while pending.
    pub is_approved: Option<bool>,
    /// Admin who issued the verdict.
    pub approved_by: Option<i64>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the accommodation was created.
    pub created_at: DateTime<Utc>,
    /// When the accommodation was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Accommodation {
    /// Whether the listing has passed moderation.
    pub fn is_visible(&self) -> bool {
        self.is_approved == Some(true) && !self.is_deleted
    }

    /// Whether moderation is still pending.
    pub fn is_pending_approval(&self) -> bool {
        self.is_approved.is_none()
    }
}

/// Data required to create a new accommodation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccommodation {
    /// City the property is located in.
    pub city_id: i64,
    /// District the property is located in.
    pub district_id: i64,
    /// Owning user.
    pub owner_id: i64,
    /// Street address.
    pub address: String,
    /// Listing name.
    pub name: String,
    /// Listing description.
    pub description: String,
    /// Dictionary entries describing conditions and services.
    pub dictionary_ids: Vec<i64>,
}

/// Data for updating an existing accommodation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccommodation {
    /// New city.
    pub city_id: Option<i64>,
    /// New district.
    pub district_id: Option<i64>,
    /// New address.
    pub address: Option<String>,
    /// New listing name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(approved: Option<bool>, deleted: bool) -> Accommodation {
        Accommodation {
            id: 1,
            city_id: 1,
            district_id: 1,
            owner_id: 1,
            address: "12 Abay Ave".to_string(),
            name: "Cozy flat".to_string(),
            description: "Two rooms near the park".to_string(),
            rating: 4.5,
            is_approved: approved,
            approved_by: approved.map(|_| 99),
            is_deleted: deleted,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_visibility_requires_approval() {
        assert!(sample(Some(true), false).is_visible());
        assert!(!sample(Some(false), false).is_visible());
        assert!(!sample(None, false).is_visible());
        assert!(!sample(Some(true), true).is_visible());
    }

    #[test]
    fn test_pending_approval() {
        assert!(sample(None, false).is_pending_approval());
        assert!(!sample(Some(false), false).is_pending_approval());
    }
}
