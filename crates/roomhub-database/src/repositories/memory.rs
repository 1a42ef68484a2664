//! In-memory store implementations using Tokio synchronization.
//!
//! These back the store traits with plain maps for single-node use and
//! for exercising the conflict resolver, services, and sweeper without a
//! database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use roomhub_core::result::AppResult;
use roomhub_core::traits::{AuditEvent, AuditSink};
use roomhub_entity::reservation::{
    CreateReservation, Reservation, ReservationFilter, ReservationStatus,
};
use roomhub_entity::room::{CreateRoom, Room, UpdateRoom};

use crate::store::{ReservationStore, RoomStore};

/// In-memory room store.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoomStore {
    rooms: Arc<RwLock<HashMap<Uuid, Room>>>,
}

impl MemoryRoomStore {
    /// Creates an empty in-memory room store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn create(&self, data: &CreateRoom) -> AppResult<Room> {
        let now = Utc::now();
        let room = Room {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            capacity: data.capacity,
            facilities: data.facilities.clone(),
            is_active: true,
            buffer_time_minutes: data.buffer_time_minutes,
            created_at: now,
            updated_at: now,
        };
        self.rooms.write().await.insert(room.id, room.clone());
        Ok(room)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>> {
        Ok(self.rooms.read().await.get(&id).cloned())
    }

    async fn find_active_by_name(&self, name: &str) -> AppResult<Option<Room>> {
        let wanted = name.to_lowercase();
        Ok(self
            .rooms
            .read()
            .await
            .values()
            .find(|r| r.is_active && r.name.to_lowercase() == wanted)
            .cloned())
    }

    async fn list_active(&self) -> AppResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self
            .rooms
            .read()
            .await
            .values()
            .filter(|r| r.is_active)
            .cloned()
            .collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rooms)
    }

    async fn update(&self, id: Uuid, changes: &UpdateRoom) -> AppResult<Option<Room>> {
        let mut rooms = self.rooms.write().await;
        let Some(room) = rooms.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            room.name = name.clone();
        }
        if let Some(capacity) = changes.capacity {
            room.capacity = capacity;
        }
        if let Some(facilities) = &changes.facilities {
            room.facilities = facilities.clone();
        }
        if let Some(buffer) = changes.buffer_time_minutes {
            room.buffer_time_minutes = buffer;
        }
        room.updated_at = Utc::now();
        Ok(Some(room.clone()))
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<Option<Room>> {
        let mut rooms = self.rooms.write().await;
        let Some(room) = rooms.get_mut(&id) else {
            return Ok(None);
        };
        room.is_active = active;
        room.updated_at = Utc::now();
        Ok(Some(room.clone()))
    }
}

/// In-memory reservation store.
#[derive(Debug, Clone, Default)]
pub struct MemoryReservationStore {
    reservations: Arc<RwLock<HashMap<Uuid, Reservation>>>,
}

impl MemoryReservationStore {
    /// Creates an empty in-memory reservation store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationStore for MemoryReservationStore {
    async fn create(&self, data: &CreateReservation) -> AppResult<Reservation> {
        let now = Utc::now();
        let reservation = Reservation {
            id: Uuid::new_v4(),
            room_id: data.room_id,
            requester_id: data.requester_id,
            title: data.title.clone(),
            start_time: data.start_time,
            end_time: data.end_time,
            status: ReservationStatus::Approved,
            created_at: now,
            updated_at: now,
        };
        self.reservations
            .write()
            .await
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        Ok(self.reservations.read().await.get(&id).cloned())
    }

    async fn find_filtered(&self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>> {
        let mut matches: Vec<Reservation> = self
            .reservations
            .read()
            .await
            .values()
            .filter(|r| {
                filter.requester_id.is_none_or(|id| r.requester_id == id)
                    && filter.room_id.is_none_or(|id| r.room_id == id)
                    && filter.status.is_none_or(|s| r.status == s)
                    && filter.starts_from.is_none_or(|t| r.start_time >= t)
                    && filter.starts_until.is_none_or(|t| r.start_time <= t)
            })
            .cloned()
            .collect();
        matches.sort_by_key(|r| r.start_time);
        Ok(matches)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> AppResult<Option<Reservation>> {
        let mut reservations = self.reservations.write().await;
        let Some(reservation) = reservations.get_mut(&id) else {
            return Ok(None);
        };
        reservation.status = status;
        reservation.updated_at = Utc::now();
        Ok(Some(reservation.clone()))
    }

    async fn find_conflicting(
        &self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        buffer: Duration,
    ) -> AppResult<Option<Reservation>> {
        Ok(self
            .reservations
            .read()
            .await
            .values()
            .filter(|r| {
                r.room_id == room_id
                    && r.status.blocks_slot()
                    && r.conflicts_with(start, end, buffer)
            })
            .max_by_key(|r| r.end_time)
            .cloned())
    }

    async fn find_busy_room_ids(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Uuid>> {
        let mut ids: Vec<Uuid> = self
            .reservations
            .read()
            .await
            .values()
            .filter(|r| r.status.blocks_slot() && r.start_time < end && r.end_time > start)
            .map(|r| r.room_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    async fn has_future_commitments(
        &self,
        room_id: Uuid,
        after: DateTime<Utc>,
    ) -> AppResult<bool> {
        Ok(self
            .reservations
            .read()
            .await
            .values()
            .any(|r| r.room_id == room_id && r.status.blocks_slot() && r.start_time > after))
    }

    async fn complete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut reservations = self.reservations.write().await;
        let mut changed = 0u64;
        for reservation in reservations.values_mut() {
            if reservation.status == ReservationStatus::Approved && reservation.end_time < now {
                reservation.status = ReservationStatus::Completed;
                reservation.updated_at = Utc::now();
                changed += 1;
            }
        }
        Ok(changed)
    }
}

/// Audit sink that collects events in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty in-memory audit sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, oldest first.
    pub async fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}
