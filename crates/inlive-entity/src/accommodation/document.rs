//! Accommodation document entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An ownership or legal document attached to an accommodation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccommodationDocument {
    /// Unique document identifier.
    pub id: i64,
    /// Owning accommodation.
    pub acc_id: i64,
    /// Document URL in the file-manager service.
    pub document_url: String,
    /// Document type label (e.g. ownership certificate).
    pub document_type: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}
