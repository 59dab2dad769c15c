//! Accommodation unit entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::unit_type::UnitType;

/// A rentable unit inside an accommodation (room, apartment, bed).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccommodationUnit {
    /// Unique unit identifier.
    pub id: i64,
    /// Owning accommodation.
    pub acc_id: i64,
    /// Kind of unit.
    pub unit_type: UnitType,
    /// Unit name.
    pub name: String,
    /// Unit description.
    pub description: String,
    /// Maximum number of guests.
    pub capacity: i32,
    /// Floor area in square meters.
    pub area: Option<f64>,
    /// Floor number.
    pub floor: Option<i32>,
    /// Whether the unit is currently open for requests.
    pub is_available: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the unit was created.
    pub created_at: DateTime<Utc>,
    /// When the unit was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUnit {
    /// Owning accommodation.
    pub acc_id: i64,
    /// Kind of unit.
    pub unit_type: UnitType,
    /// Unit name.
    pub name: String,
    /// Unit description.
    pub description: String,
    /// Maximum number of guests.
    pub capacity: i32,
    /// Floor area in square meters.
    pub area: Option<f64>,
    /// Floor number.
    pub floor: Option<i32>,
    /// Dictionary entries describing unit conditions.
    pub dictionary_ids: Vec<i64>,
}

/// Data for updating an existing unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUnit {
    /// New unit type.
    pub unit_type: Option<UnitType>,
    /// New unit name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New capacity.
    pub capacity: Option<i32>,
    /// New floor area.
    pub area: Option<f64>,
    /// New floor number.
    pub floor: Option<i32>,
    /// New availability flag.
    pub is_available: Option<bool>,
}
