//! Unit tariff entity and range type enumeration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Billing period a tariff price applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "range_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangeType {
    /// Price per night.
    PerNight,
    /// Price per day.
    PerDay,
    /// Price per month.
    PerMonth,
}

impl RangeType {
    /// Return the range type as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerNight => "PER_NIGHT",
            Self::PerDay => "PER_DAY",
            Self::PerMonth => "PER_MONTH",
        }
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RangeType {
    type Err = inlive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PER_NIGHT" => Ok(Self::PerNight),
            "PER_DAY" => Ok(Self::PerDay),
            "PER_MONTH" => Ok(Self::PerMonth),
            _ => Err(inlive_core::AppError::validation(format!(
                "Invalid range type: '{s}'. Expected one of: PER_NIGHT, PER_DAY, PER_MONTH"
            ))),
        }
    }
}

/// A price offered for a unit under a billing period.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UnitTariff {
    /// Unique tariff identifier.
    pub id: i64,
    /// Owning accommodation.
    pub acc_id: i64,
    /// Owning unit.
    pub acc_unit_id: i64,
    /// Price amount.
    pub price: f64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Billing period.
    pub range_type: RangeType,
    /// Optional dictionary entry refining the range type.
    pub range_dictionary_id: Option<i64>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the tariff was created.
    pub created_at: DateTime<Utc>,
    /// When the tariff was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Default tariff currency.
pub const DEFAULT_CURRENCY: &str = "KZT";
