//! Dictionary key enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category a dictionary entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "dictionary_key", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DictionaryKey {
    /// Condition attributes of an accommodation (e.g. renovated, furnished).
    AccCondition,
    /// Services offered by an accommodation (e.g. wifi, parking).
    AccService,
    /// Condition attributes of a single unit.
    UnitCondition,
    /// Tariff range type entries (per night, per month).
    RangeType,
}

impl DictionaryKey {
    /// Return the key as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccCondition => "ACC_CONDITION",
            Self::AccService => "ACC_SERVICE",
            Self::UnitCondition => "UNIT_CONDITION",
            Self::RangeType => "RANGE_TYPE",
        }
    }
}

impl fmt::Display for DictionaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DictionaryKey {
    type Err = inlive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACC_CONDITION" => Ok(Self::AccCondition),
            "ACC_SERVICE" => Ok(Self::AccService),
            "UNIT_CONDITION" => Ok(Self::UnitCondition),
            "RANGE_TYPE" => Ok(Self::RangeType),
            _ => Err(inlive_core::AppError::validation(format!(
                "Invalid dictionary key: '{s}'. Expected one of: ACC_CONDITION, ACC_SERVICE, UNIT_CONDITION, RANGE_TYPE"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_wire_strings() {
        for key in [
            DictionaryKey::AccCondition,
            DictionaryKey::AccService,
            DictionaryKey::UnitCondition,
            DictionaryKey::RangeType,
        ] {
            assert_eq!(key.as_str().parse::<DictionaryKey>().ok(), Some(key));
        }
    }

    #[test]
    fn test_rejects_unknown_key() {
        assert!("NOT_A_KEY".parse::<DictionaryKey>().is_err());
    }
}
