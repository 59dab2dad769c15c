//! Accommodation-to-dictionary link entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Links an accommodation to a dictionary entry describing one of its
/// conditions or services.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccommodationDictionary {
    /// Unique link identifier.
    pub id: i64,
    /// Owning accommodation.
    pub acc_id: i64,
    /// Linked dictionary entry.
    pub dictionary_id: i64,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    /// When the link was last updated.
    pub updated_at: DateTime<Utc>,
}
