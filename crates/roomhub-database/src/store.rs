//! Store traits for the booking core.
//!
//! The conflict resolver, the sweeper, and the services consult the data
//! store exclusively through these traits so they can be exercised against
//! the in-memory implementations without a database. No business rules
//! live behind them; they are persistence plus simple lookups.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use roomhub_core::result::AppResult;
use roomhub_entity::reservation::{
    CreateReservation, Reservation, ReservationFilter, ReservationStatus,
};
use roomhub_entity::room::{CreateRoom, Room, UpdateRoom};

/// Persistence for the room registry.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Persist a new room with `is_active = true`.
    async fn create(&self, data: &CreateRoom) -> AppResult<Room>;

    /// Find a room by its primary key, active or not.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>>;

    /// Case-insensitive exact name match, restricted to active rooms.
    async fn find_active_by_name(&self, name: &str) -> AppResult<Option<Room>>;

    /// All rooms with `is_active = true`.
    async fn list_active(&self) -> AppResult<Vec<Room>>;

    /// Merge the given partial fields into an existing room.
    /// Returns `None` if the room does not exist.
    async fn update(&self, id: Uuid, changes: &UpdateRoom) -> AppResult<Option<Room>>;

    /// Flip the active flag. Returns `None` if the room does not exist.
    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<Option<Room>>;
}

/// Persistence for reservation records.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Insert a new reservation with status `Approved`.
    async fn create(&self, data: &CreateReservation) -> AppResult<Reservation>;

    /// Fetch a reservation by its primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>>;

    /// Fetch reservations matching the filter, sorted by start time.
    async fn find_filtered(&self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>>;

    /// Set the status of one reservation. Returns the updated record, or
    /// `None` if it does not exist.
    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> AppResult<Option<Reservation>>;

    /// Find a non-cancelled reservation on the room whose buffer-expanded
    /// interval intersects `[start, end)`:
    /// `existing.start < end + buffer AND existing.end + buffer > start`.
    ///
    /// When several conflict, the one freeing the room last is returned so
    /// callers can report the true next-available instant.
    async fn find_conflicting(
        &self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        buffer: Duration,
    ) -> AppResult<Option<Reservation>>;

    /// Distinct ids of rooms holding a non-cancelled reservation whose raw
    /// interval intersects `[start, end)`. No buffer is applied here.
    async fn find_busy_room_ids(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Uuid>>;

    /// Whether the room has any non-cancelled reservation starting after
    /// the given instant. Used as the deactivation guard.
    async fn has_future_commitments(
        &self,
        room_id: Uuid,
        after: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Bulk-transition every `Approved` reservation with `end_time < now`
    /// to `Completed`. Returns the number of rows changed. Idempotent.
    async fn complete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
