//! Unit image entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A photo attached to a unit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UnitImage {
    /// Unique image identifier.
    pub id: i64,
    /// Owning accommodation.
    pub acc_id: i64,
    /// Owning unit.
    pub acc_unit_id: i64,
    /// Image URL in the file-manager service.
    pub image_url: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the image was created.
    pub created_at: DateTime<Utc>,
    /// When the image was last updated.
    pub updated_at: DateTime<Utc>,
}
