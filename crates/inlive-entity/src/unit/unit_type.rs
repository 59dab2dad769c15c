//! Unit type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of rentable unit within an accommodation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "unit_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    /// A single room.
    Room,
    /// A whole apartment.
    Apartment,
    /// A detached house.
    House,
    /// A bed in a shared room.
    Bed,
}

impl UnitType {
    /// Return the type as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Room => "ROOM",
            Self::Apartment => "APARTMENT",
            Self::House => "HOUSE",
            Self::Bed => "BED",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = inlive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ROOM" => Ok(Self::Room),
            "APARTMENT" => Ok(Self::Apartment),
            "HOUSE" => Ok(Self::House),
            "BED" => Ok(Self::Bed),
            _ => Err(inlive_core::AppError::validation(format!(
                "Invalid unit type: '{s}'. Expected one of: ROOM, APARTMENT, HOUSE, BED"
            ))),
        }
    }
}
