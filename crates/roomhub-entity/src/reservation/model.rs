//! Reservation entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::ReservationStatus;

/// A room booking for a contiguous time interval.
///
/// The creation path enforces `start_time < end_time`; the interval is
/// treated as half-open `[start_time, end_time)` in all overlap tests.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    /// Unique reservation identifier.
    pub id: Uuid,
    /// The room this reservation occupies.
    pub room_id: Uuid,
    /// The user who made the booking.
    pub requester_id: Uuid,
    /// Free-text label shown in listings.
    pub title: String,
    /// When the booking begins.
    pub start_time: DateTime<Utc>,
    /// When the booking ends.
    pub end_time: DateTime<Utc>,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
    /// When the reservation was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Buffer-expanded overlap test against a candidate window, both
    /// half-open: `start < candidate_end + buffer AND end + buffer >
    /// candidate_start`.
    ///
    /// Strict inequalities on both sides: a candidate starting exactly at
    /// `end + buffer` abuts and is legal. Status is not considered here;
    /// callers filter on [`ReservationStatus::blocks_slot`].
    pub fn conflicts_with(
        &self,
        candidate_start: DateTime<Utc>,
        candidate_end: DateTime<Utc>,
        buffer: Duration,
    ) -> bool {
        self.start_time < candidate_end + buffer && self.end_time + buffer > candidate_start
    }
}

/// Data required to create a new reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservation {
    /// Target room.
    pub room_id: Uuid,
    /// Booking user.
    pub requester_id: Uuid,
    /// Free-text label.
    pub title: String,
    /// Booking start.
    pub start_time: DateTime<Utc>,
    /// Booking end.
    pub end_time: DateTime<Utc>,
}

/// Filter for reservation listings. `None` fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationFilter {
    /// Restrict to one requester.
    pub requester_id: Option<Uuid>,
    /// Restrict to one room.
    pub room_id: Option<Uuid>,
    /// Restrict to one status.
    pub status: Option<ReservationStatus>,
    /// Only reservations starting at or after this instant.
    pub starts_from: Option<DateTime<Utc>>,
    /// Only reservations starting at or before this instant.
    pub starts_until: Option<DateTime<Utc>>,
}
