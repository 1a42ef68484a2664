//! Availability search over the active room set.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use roomhub_core::error::AppError;
use roomhub_core::result::AppResult;
use roomhub_database::{ReservationStore, RoomStore};
use roomhub_entity::room::Room;

/// Answers "which active rooms are free for this literal window".
///
/// The search uses raw reservation intervals, without buffer expansion.
/// That makes it a coarser signal than the conflict resolver: a room
/// returned here can still be rejected at booking time when the candidate
/// window lands inside another reservation's buffer. Creation remains the
/// final authority.
#[derive(Clone)]
pub struct AvailabilityService {
    rooms: Arc<dyn RoomStore>,
    reservations: Arc<dyn ReservationStore>,
}

impl AvailabilityService {
    /// Creates a new availability service.
    pub fn new(rooms: Arc<dyn RoomStore>, reservations: Arc<dyn ReservationStore>) -> Self {
        Self {
            rooms,
            reservations,
        }
    }

    /// Returns the active rooms with no non-cancelled reservation whose
    /// raw interval intersects `[start, end)`.
    pub async fn search_available_rooms(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Room>> {
        if start >= end {
            return Err(AppError::invalid_interval(
                "Search window start must be before its end",
            ));
        }

        let busy: HashSet<_> = self
            .reservations
            .find_busy_room_ids(start, end)
            .await?
            .into_iter()
            .collect();

        let available = self
            .rooms
            .list_active()
            .await?
            .into_iter()
            .filter(|room| !busy.contains(&room.id))
            .collect();

        Ok(available)
    }
}
