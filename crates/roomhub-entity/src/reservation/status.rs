//! Reservation lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a reservation.
///
/// `Approved` is the only non-terminal state. `Cancelled` and `Completed`
/// are terminal and mutually exclusive; nothing ever transitions out of
/// them. `Pending` is defined for a future approval workflow and unused by
/// current flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    /// Awaiting approval (reserved for future flows).
    Pending,
    /// Confirmed and occupying its slot.
    Approved,
    /// Explicitly cancelled. Terminal.
    Cancelled,
    /// Ended and archived by the sweeper. Terminal.
    Completed,
}

impl ReservationStatus {
    /// Whether no further transition is permitted from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Whether the reservation counts against a room's schedule.
    pub fn blocks_slot(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Return the status as its stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = roomhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "CANCELLED" => Ok(Self::Cancelled),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(roomhub_core::AppError::validation(format!(
                "Invalid reservation status: '{s}'. Expected one of: PENDING, APPROVED, CANCELLED, COMPLETED"
            ))),
        }
    }
}
