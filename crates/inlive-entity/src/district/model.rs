//! District entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A district within a city.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct District {
    /// Unique district identifier.
    pub id: i64,
    /// The city this district belongs to.
    pub city_id: i64,
    /// District name.
    pub name: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the district was created.
    pub created_at: DateTime<Utc>,
    /// When the district was last updated.
    pub updated_at: DateTime<Utc>,
}
