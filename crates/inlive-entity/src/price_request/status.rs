//! Price request status enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of the offer as set by the accommodation side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "price_request_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceRequestStatus {
    /// The owner offers the unit at the requested price.
    Accepted,
    /// The owner offers the unit at a different price.
    CounterOffer,
}

impl PriceRequestStatus {
    /// Return the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "ACCEPTED",
            Self::CounterOffer => "COUNTER_OFFER",
        }
    }
}

impl fmt::Display for PriceRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PriceRequestStatus {
    type Err = inlive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACCEPTED" => Ok(Self::Accepted),
            "COUNTER_OFFER" => Ok(Self::CounterOffer),
            _ => Err(inlive_core::AppError::validation(format!(
                "Invalid price request status: '{s}'"
            ))),
        }
    }
}

/// The client's response to a price offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "client_response_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientResponseStatus {
    /// No response yet.
    Waiting,
    /// Client accepted the offer.
    Accepted,
    /// Client rejected the offer.
    Rejected,
}

impl ClientResponseStatus {
    /// Whether the client may still respond.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Waiting)
    }

    /// Return the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ClientResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClientResponseStatus {
    type Err = inlive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "WAITING" => Ok(Self::Waiting),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(inlive_core::AppError::validation(format!(
                "Invalid client response status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_response_pending() {
        assert!(ClientResponseStatus::Waiting.is_pending());
        assert!(!ClientResponseStatus::Accepted.is_pending());
        assert!(!ClientResponseStatus::Rejected.is_pending());
    }
}
