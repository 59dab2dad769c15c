//! Dictionary entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::key::DictionaryKey;

/// A reference-data entry: a value under a well-known key category.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Dictionary {
    /// Unique dictionary entry identifier.
    pub id: i64,
    /// Category this entry belongs to.
    pub key: DictionaryKey,
    /// Entry value.
    pub value: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new dictionary entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDictionary {
    /// Category this entry belongs to.
    pub key: DictionaryKey,
    /// Entry value.
    pub value: String,
}

/// Data for updating an existing dictionary entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDictionary {
    /// New entry value.
    pub value: String,
}
