//! Reservation lifecycle operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use roomhub_core::error::AppError;
use roomhub_core::result::AppResult;
use roomhub_core::traits::{AuditAction, AuditSink, Clock};
use roomhub_database::{ReservationStore, RoomStore};
use roomhub_entity::reservation::{
    CreateReservation, Reservation, ReservationFilter, ReservationStatus,
};

use crate::context::RequesterContext;
use crate::locks::RoomLocks;
use crate::reservation::conflict::{ConflictResolver, RoomRef};

/// Request to create a new reservation.
#[derive(Debug, Clone)]
pub struct CreateReservationRequest {
    /// Target room, by id or by name.
    pub room: RoomRef,
    /// Free-text label.
    pub title: String,
    /// Booking start.
    pub start_time: DateTime<Utc>,
    /// Booking end.
    pub end_time: DateTime<Utc>,
}

/// Manages the reservation lifecycle: creation through the conflict
/// resolver, filtered listings, and cancellation with ownership checks.
#[derive(Clone)]
pub struct ReservationService {
    reservations: Arc<dyn ReservationStore>,
    resolver: ConflictResolver,
    locks: Arc<RoomLocks>,
    audit: Arc<dyn AuditSink>,
}

impl ReservationService {
    /// Creates a new reservation service.
    pub fn new(
        rooms: Arc<dyn RoomStore>,
        reservations: Arc<dyn ReservationStore>,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let resolver = ConflictResolver::new(rooms, Arc::clone(&reservations), clock);
        Self {
            reservations,
            resolver,
            locks: Arc::new(RoomLocks::new()),
            audit,
        }
    }

    /// Creates a reservation if the requested slot is legal.
    ///
    /// The conflict check and the insert run under the room's advisory
    /// lock, so of two concurrent requests for overlapping slots at most
    /// one succeeds. The reservation is created directly in `Approved`
    /// state; there is no pending-approval step today.
    pub async fn create_reservation(
        &self,
        ctx: &RequesterContext,
        req: CreateReservationRequest,
    ) -> AppResult<Reservation> {
        if req.title.trim().is_empty() {
            return Err(AppError::validation("Reservation title cannot be empty"));
        }

        self.resolver.validate_window(req.start_time, req.end_time)?;
        let room = self.resolver.resolve_room(&req.room).await?;

        // Everything between the conflict check and the insert stays under
        // the room's lock.
        let _guard = self.locks.acquire(room.id).await;

        self.resolver
            .ensure_slot_free(&room, req.start_time, req.end_time)
            .await?;

        let reservation = self
            .reservations
            .create(&CreateReservation {
                room_id: room.id,
                requester_id: ctx.user_id,
                title: req.title.clone(),
                start_time: req.start_time,
                end_time: req.end_time,
            })
            .await?;

        info!(
            reservation_id = %reservation.id,
            room_id = %room.id,
            requester_id = %ctx.user_id,
            "Reservation created"
        );

        self.record_audit(
            ctx.audit_event(
                AuditAction::CreateReservation,
                Some(reservation.id),
                format!(
                    "Booked room '{}' ({}) [buffer: {}m]",
                    room.name, reservation.title, room.buffer_time_minutes
                ),
                None,
                serde_json::to_value(&reservation).ok(),
            ),
        )
        .await;

        Ok(reservation)
    }

    /// Lists reservations matching the filter.
    ///
    /// Non-admin callers only ever see their own reservations; any
    /// `requester_id` in the filter is overridden with the caller's id.
    pub async fn list_reservations(
        &self,
        ctx: &RequesterContext,
        mut filter: ReservationFilter,
    ) -> AppResult<Vec<Reservation>> {
        if !ctx.is_admin() {
            filter.requester_id = Some(ctx.user_id);
        }
        self.reservations.find_filtered(&filter).await
    }

    /// Cancels a reservation.
    ///
    /// Only an admin or the original requester may cancel. Cancellation
    /// is terminal; a reservation already cancelled or completed is
    /// rejected.
    pub async fn cancel_reservation(
        &self,
        ctx: &RequesterContext,
        id: Uuid,
    ) -> AppResult<Reservation> {
        let reservation = self
            .reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::reservation_not_found(format!("No reservation with id {id}")))?;

        if reservation.status.is_terminal() {
            return Err(AppError::already_cancelled(format!(
                "Reservation is already {}",
                reservation.status
            )));
        }

        if !ctx.is_admin() && reservation.requester_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the requester or an admin may cancel this reservation",
            ));
        }

        let cancelled = self
            .reservations
            .update_status(id, ReservationStatus::Cancelled)
            .await?
            .ok_or_else(|| AppError::reservation_not_found(format!("No reservation with id {id}")))?;

        info!(
            reservation_id = %id,
            actor_id = %ctx.user_id,
            "Reservation cancelled"
        );

        self.record_audit(
            ctx.audit_event(
                AuditAction::CancelReservation,
                Some(id),
                format!("Cancelled reservation '{}'", reservation.title),
                Some(serde_json::json!({ "status": reservation.status })),
                Some(serde_json::json!({ "status": cancelled.status })),
            ),
        )
        .await;

        Ok(cancelled)
    }

    /// Audit recording is best-effort: a failed write is logged, never
    /// propagated to the caller.
    async fn record_audit(&self, event: roomhub_core::traits::AuditEvent) {
        if let Err(e) = self.audit.record_event(event).await {
            warn!(error = %e, "Failed to record audit event");
        }
    }
}
