//! Search request status machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a search request.
///
/// A fresh request is open for price offers. Once at least one offer
/// arrives it becomes pending; accepting an offer moves it to waiting
/// for the owner's reservation decision. Terminal states are finished,
/// cancelled and expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "search_request_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchRequestStatus {
    /// Open for accommodation owners to submit price offers.
    OpenToPriceRequest,
    /// At least one price offer exists; client is choosing.
    PriceRequestPending,
    /// Client accepted an offer; waiting for reservation approval.
    WaitToReservation,
    /// Reservation approved; the request is complete.
    Finished,
    /// Cancelled by the author.
    Cancelled,
    /// Expired without completion.
    Expired,
}

impl SearchRequestStatus {
    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled | Self::Expired)
    }

    /// Whether new price offers may be submitted in this status.
    pub fn accepts_price_requests(&self) -> bool {
        matches!(self, Self::OpenToPriceRequest | Self::PriceRequestPending)
    }

    /// Whether the status machine allows moving to `next`.
    pub fn can_transition_to(&self, next: Self) -> bool {
        use SearchRequestStatus::*;
        match (self, next) {
            (OpenToPriceRequest, PriceRequestPending) => true,
            (PriceRequestPending, WaitToReservation) => true,
            // a rejected reservation reopens offer selection
            (WaitToReservation, PriceRequestPending) => true,
            (WaitToReservation, Finished) => true,
            (s, Cancelled) | (s, Expired) => !s.is_terminal(),
            _ => false,
        }
    }

    /// Return the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenToPriceRequest => "OPEN_TO_PRICE_REQUEST",
            Self::PriceRequestPending => "PRICE_REQUEST_PENDING",
            Self::WaitToReservation => "WAIT_TO_RESERVATION",
            Self::Finished => "FINISHED",
            Self::Cancelled => "CANCELLED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for SearchRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SearchRequestStatus {
    type Err = inlive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OPEN_TO_PRICE_REQUEST" => Ok(Self::OpenToPriceRequest),
            "PRICE_REQUEST_PENDING" => Ok(Self::PriceRequestPending),
            "WAIT_TO_RESERVATION" => Ok(Self::WaitToReservation),
            "FINISHED" => Ok(Self::Finished),
            "CANCELLED" => Ok(Self::Cancelled),
            "EXPIRED" => Ok(Self::Expired),
            _ => Err(inlive_core::AppError::validation(format!(
                "Invalid search request status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SearchRequestStatus::*;

    #[test]
    fn test_happy_path_transitions() {
        assert!(OpenToPriceRequest.can_transition_to(PriceRequestPending));
        assert!(PriceRequestPending.can_transition_to(WaitToReservation));
        assert!(WaitToReservation.can_transition_to(Finished));
    }

    #[test]
    fn test_rejected_reservation_reopens_selection() {
        assert!(WaitToReservation.can_transition_to(PriceRequestPending));
    }

    #[test]
    fn test_terminal_states_are_final() {
        for terminal in [Finished, Cancelled, Expired] {
            assert!(terminal.is_terminal());
            assert!(!terminal.can_transition_to(OpenToPriceRequest));
            assert!(!terminal.can_transition_to(Cancelled));
        }
    }

    #[test]
    fn test_offers_allowed_only_while_open() {
        assert!(OpenToPriceRequest.accepts_price_requests());
        assert!(PriceRequestPending.accepts_price_requests());
        assert!(!WaitToReservation.accepts_price_requests());
        assert!(!Expired.accepts_price_requests());
    }
}
