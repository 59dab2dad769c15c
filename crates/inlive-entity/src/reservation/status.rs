//! Reservation status machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a reservation.
///
/// A reservation is created in `WaitingToApprove` when the client accepts
/// a price offer. The accommodation owner then approves or rejects it.
/// Approved reservations later terminate in one of the closed states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Awaiting the owner's decision.
    WaitingToApprove,
    /// Owner approved the reservation.
    Approved,
    /// Owner rejected the reservation.
    Rejected,
    /// Stay completed and paid.
    Successful,
    /// Stay completed.
    FinishedSuccessful,
    /// Client did not show up.
    ClientDidntCame,
    /// Cancelled before the stay.
    Canceled,
}

impl ReservationStatus {
    /// Whether the owner can still decide on this reservation.
    pub fn is_decidable(&self) -> bool {
        matches!(self, Self::WaitingToApprove)
    }

    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Rejected | Self::Successful | Self::FinishedSuccessful | Self::ClientDidntCame | Self::Canceled
        )
    }

    /// Whether the status machine allows moving to `next`.
    pub fn can_transition_to(&self, next: Self) -> bool {
        use ReservationStatus::*;
        match (self, next) {
            (WaitingToApprove, Approved) | (WaitingToApprove, Rejected) => true,
            (WaitingToApprove, Canceled) => true,
            (Approved, Successful)
            | (Approved, FinishedSuccessful)
            | (Approved, ClientDidntCame)
            | (Approved, Canceled) => true,
            _ => false,
        }
    }

    /// Return the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WaitingToApprove => "WAITING_TO_APPROVE",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Successful => "SUCCESSFUL",
            Self::FinishedSuccessful => "FINISHED_SUCCESSFUL",
            Self::ClientDidntCame => "CLIENT_DIDNT_CAME",
            Self::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = inlive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "WAITING_TO_APPROVE" => Ok(Self::WaitingToApprove),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "SUCCESSFUL" => Ok(Self::Successful),
            "FINISHED_SUCCESSFUL" => Ok(Self::FinishedSuccessful),
            "CLIENT_DIDNT_CAME" => Ok(Self::ClientDidntCame),
            "CANCELED" => Ok(Self::Canceled),
            _ => Err(inlive_core::AppError::validation(format!(
                "Invalid reservation status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReservationStatus::*;

    #[test]
    fn test_owner_decision_transitions() {
        assert!(WaitingToApprove.can_transition_to(Approved));
        assert!(WaitingToApprove.can_transition_to(Rejected));
        assert!(!WaitingToApprove.can_transition_to(Successful));
    }

    #[test]
    fn test_approved_closes_out() {
        assert!(Approved.can_transition_to(FinishedSuccessful));
        assert!(Approved.can_transition_to(ClientDidntCame));
        assert!(!Approved.can_transition_to(WaitingToApprove));
    }

    #[test]
    fn test_terminal_states() {
        for terminal in [Rejected, Successful, FinishedSuccessful, ClientDidntCame, Canceled] {
            assert!(terminal.is_terminal());
            assert!(!terminal.can_transition_to(Approved));
        }
        assert!(WaitingToApprove.is_decidable());
        assert!(!Approved.is_decidable());
    }
}
