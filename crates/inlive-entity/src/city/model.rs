//! City entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A city in which accommodations are listed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct City {
    /// Unique city identifier.
    pub id: i64,
    /// City name.
    pub name: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the city was created.
    pub created_at: DateTime<Utc>,
    /// When the city was last updated.
    pub updated_at: DateTime<Utc>,
}
