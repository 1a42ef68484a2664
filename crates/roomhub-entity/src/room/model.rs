//! Room entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Default buffer time applied to new rooms, in minutes.
pub const DEFAULT_BUFFER_MINUTES: i32 = 15;

/// A bookable meeting room.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    /// Unique room identifier.
    pub id: Uuid,
    /// Display name. Lookups match it case-insensitively; the registry does
    /// not enforce uniqueness.
    pub name: String,
    /// Seating capacity (at least 1).
    pub capacity: i32,
    /// Amenities available in the room. Order carries no meaning.
    pub facilities: Vec<String>,
    /// Whether the room can be booked. Deactivation is a soft delete:
    /// historical reservations keep referencing the room.
    pub is_active: bool,
    /// Mandatory gap in minutes before and after every reservation.
    pub buffer_time_minutes: i32,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// The room's buffer policy as a duration.
    pub fn buffer(&self) -> Duration {
        Duration::minutes(self.buffer_time_minutes as i64)
    }
}

/// Data required to create a new room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoom {
    /// Display name.
    pub name: String,
    /// Seating capacity.
    pub capacity: i32,
    /// Amenities.
    #[serde(default)]
    pub facilities: Vec<String>,
    /// Buffer policy in minutes; defaults to [`DEFAULT_BUFFER_MINUTES`].
    #[serde(default = "default_buffer")]
    pub buffer_time_minutes: i32,
}

/// Partial update for an existing room. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoom {
    /// New display name.
    pub name: Option<String>,
    /// New capacity.
    pub capacity: Option<i32>,
    /// Replacement amenity list.
    pub facilities: Option<Vec<String>>,
    /// New buffer policy in minutes.
    pub buffer_time_minutes: Option<i32>,
}

fn default_buffer() -> i32 {
    DEFAULT_BUFFER_MINUTES
}
