//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user. Identity lives in Keycloak; this row mirrors the
/// profile attributes the marketplace needs locally.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Subject identifier of the Keycloak account backing this user.
    pub keycloak_id: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// URL of the profile photo stored in the file manager.
    pub photo_url: Option<String>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Data required to create a new user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Keycloak subject identifier.
    pub keycloak_id: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New phone number.
    pub phone_number: Option<String>,
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
}
