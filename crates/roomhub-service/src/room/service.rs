//! Room registry operations.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use roomhub_core::error::AppError;
use roomhub_core::result::AppResult;
use roomhub_core::traits::{AuditAction, AuditSink, Clock};
use roomhub_database::{ReservationStore, RoomStore};
use roomhub_entity::room::{CreateRoom, Room, UpdateRoom};

use crate::context::RequesterContext;

/// Manages the meeting-room inventory.
///
/// All mutating operations here are admin-only; the caller performs the
/// authorization check before invoking them.
#[derive(Clone)]
pub struct RoomService {
    rooms: Arc<dyn RoomStore>,
    reservations: Arc<dyn ReservationStore>,
    audit: Arc<dyn AuditSink>,
    clock: Arc<dyn Clock>,
}

impl RoomService {
    /// Creates a new room service.
    pub fn new(
        rooms: Arc<dyn RoomStore>,
        reservations: Arc<dyn ReservationStore>,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rooms,
            reservations,
            audit,
            clock,
        }
    }

    /// Creates a new bookable room.
    ///
    /// The registry does not enforce name uniqueness; collisions are left
    /// to downstream consumers to reject if they care.
    pub async fn create_room(&self, ctx: &RequesterContext, data: CreateRoom) -> AppResult<Room> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Room name cannot be empty"));
        }
        if data.capacity < 1 {
            return Err(AppError::validation("Room capacity must be at least 1"));
        }
        if data.buffer_time_minutes < 0 {
            return Err(AppError::validation("Buffer time cannot be negative"));
        }

        let room = self.rooms.create(&data).await?;

        info!(room_id = %room.id, name = %room.name, "Room created");

        self.record_audit(ctx.audit_event(
            AuditAction::CreateRoom,
            Some(room.id),
            format!("Created room '{}' (capacity {})", room.name, room.capacity),
            None,
            serde_json::to_value(&room).ok(),
        ))
        .await;

        Ok(room)
    }

    /// Fetches a room by id, active or not.
    pub async fn get_room(&self, id: Uuid) -> AppResult<Room> {
        self.rooms
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::room_not_found(format!("No room with id {id}")))
    }

    /// Case-insensitive exact name lookup among active rooms.
    pub async fn find_room_by_name(&self, name: &str) -> AppResult<Room> {
        self.rooms
            .find_active_by_name(name)
            .await?
            .ok_or_else(|| AppError::room_not_found(format!("No active room named '{name}'")))
    }

    /// Lists all active rooms.
    pub async fn list_active_rooms(&self) -> AppResult<Vec<Room>> {
        self.rooms.list_active().await
    }

    /// Merges partial fields into an existing room.
    pub async fn update_room(
        &self,
        ctx: &RequesterContext,
        id: Uuid,
        changes: UpdateRoom,
    ) -> AppResult<Room> {
        if let Some(name) = &changes.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Room name cannot be empty"));
            }
        }
        if let Some(capacity) = changes.capacity {
            if capacity < 1 {
                return Err(AppError::validation("Room capacity must be at least 1"));
            }
        }
        if let Some(buffer) = changes.buffer_time_minutes {
            if buffer < 0 {
                return Err(AppError::validation("Buffer time cannot be negative"));
            }
        }

        let before = self.get_room(id).await?;

        let updated = self
            .rooms
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::room_not_found(format!("No room with id {id}")))?;

        info!(room_id = %id, "Room updated");

        self.record_audit(ctx.audit_event(
            AuditAction::UpdateRoom,
            Some(id),
            format!("Updated room '{}'", updated.name),
            serde_json::to_value(&before).ok(),
            serde_json::to_value(&updated).ok(),
        ))
        .await;

        Ok(updated)
    }

    /// Deactivates a room (soft delete).
    ///
    /// Rooms with a non-cancelled reservation starting in the future
    /// cannot be deactivated; cancel or wait out the commitments first.
    /// Historical reservations keep referencing the room, which is why
    /// rooms are never hard-deleted.
    pub async fn deactivate_room(&self, ctx: &RequesterContext, id: Uuid) -> AppResult<Room> {
        let room = self.get_room(id).await?;

        if self
            .reservations
            .has_future_commitments(room.id, self.clock.now())
            .await?
        {
            return Err(AppError::conflict(format!(
                "Room '{}' still has upcoming reservations",
                room.name
            )));
        }

        let deactivated = self
            .rooms
            .set_active(id, false)
            .await?
            .ok_or_else(|| AppError::room_not_found(format!("No room with id {id}")))?;

        info!(room_id = %id, name = %deactivated.name, "Room deactivated");

        self.record_audit(ctx.audit_event(
            AuditAction::DeactivateRoom,
            Some(id),
            format!("Deactivated room '{}'", deactivated.name),
            Some(serde_json::json!({ "is_active": room.is_active })),
            Some(serde_json::json!({ "is_active": false })),
        ))
        .await;

        Ok(deactivated)
    }

    /// Audit recording is best-effort: a failed write is logged, never
    /// propagated to the caller.
    async fn record_audit(&self, event: roomhub_core::traits::AuditEvent) {
        if let Err(e) = self.audit.record_event(event).await {
            warn!(error = %e, "Failed to record audit event");
        }
    }
}
