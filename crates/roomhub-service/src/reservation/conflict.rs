//! The booking conflict-resolution engine.
//!
//! Decides whether a candidate interval can legally be reserved on a room,
//! given the room's buffer policy and the existing non-cancelled
//! reservations. The overlap rule itself lives on
//! [`roomhub_entity::reservation::Reservation::conflicts_with`]: buffer
//! time is symmetric and applied to the *existing* reservation's bounds,
//! so back-to-back bookings always respect the room's turnover gap
//! regardless of which booking came first.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use roomhub_core::error::AppError;
use roomhub_core::result::AppResult;
use roomhub_core::traits::Clock;
use roomhub_database::{ReservationStore, RoomStore};
use roomhub_entity::room::Room;

/// How a reservation request names its target room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomRef {
    /// Direct reference by room id.
    Id(Uuid),
    /// Reference by display name, matched case-insensitively among active
    /// rooms.
    Name(String),
}

/// Validates candidate reservation windows against the room registry and
/// the reservation store.
#[derive(Clone)]
pub struct ConflictResolver {
    rooms: Arc<dyn RoomStore>,
    reservations: Arc<dyn ReservationStore>,
    clock: Arc<dyn Clock>,
}

impl ConflictResolver {
    /// Creates a new conflict resolver.
    pub fn new(
        rooms: Arc<dyn RoomStore>,
        reservations: Arc<dyn ReservationStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rooms,
            reservations,
            clock,
        }
    }

    /// Reject degenerate, inverted, or retroactive windows.
    pub fn validate_window(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<()> {
        if start >= end {
            return Err(AppError::invalid_interval(
                "Reservation start must be before its end",
            ));
        }
        if start < self.clock.now() {
            return Err(AppError::past_booking(
                "Reservations cannot start in the past",
            ));
        }
        Ok(())
    }

    /// Resolve the target room.
    ///
    /// Name lookups only see active rooms, so a miss is reported as
    /// not-found. Id lookups distinguish a missing room from a
    /// deactivated one.
    pub async fn resolve_room(&self, room_ref: &RoomRef) -> AppResult<Room> {
        match room_ref {
            RoomRef::Id(id) => {
                let room = self
                    .rooms
                    .find_by_id(*id)
                    .await?
                    .ok_or_else(|| AppError::room_not_found(format!("No room with id {id}")))?;
                if !room.is_active {
                    return Err(AppError::room_inactive(format!(
                        "Room '{}' has been deactivated",
                        room.name
                    )));
                }
                Ok(room)
            }
            RoomRef::Name(name) => self
                .rooms
                .find_active_by_name(name)
                .await?
                .ok_or_else(|| {
                    AppError::room_not_found(format!(
                        "No active room named '{name}'"
                    ))
                }),
        }
    }

    /// Check the candidate window against existing reservations on the
    /// room, with the room's buffer applied to the existing bounds.
    ///
    /// On conflict the error carries the actual next-available instant,
    /// `conflicting.end_time + buffer`.
    pub async fn ensure_slot_free(
        &self,
        room: &Room,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<()> {
        let buffer = room.buffer();
        if let Some(conflicting) = self
            .reservations
            .find_conflicting(room.id, start, end, buffer)
            .await?
        {
            let next_available = conflicting.end_time + buffer;
            return Err(AppError::slot_unavailable(&room.name, next_available));
        }
        Ok(())
    }
}
