//! Audit trail sink interface.
//!
//! The booking core emits an [`AuditEvent`] for every mutating action. The
//! sink is an outbound dependency: the database crate provides a persistent
//! implementation, and services treat recording as best-effort.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::result::AppResult;

/// The kind of action an audit event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// A room was created.
    CreateRoom,
    /// A room was updated.
    UpdateRoom,
    /// A room was deactivated (soft delete).
    DeactivateRoom,
    /// A reservation was created.
    CreateReservation,
    /// A reservation was cancelled.
    CancelReservation,
}

impl AuditAction {
    /// Return the action as its stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateRoom => "CREATE_ROOM",
            Self::UpdateRoom => "UPDATE_ROOM",
            Self::DeactivateRoom => "DEACTIVATE_ROOM",
            Self::CreateReservation => "CREATE_RESERVATION",
            Self::CancelReservation => "CANCEL_RESERVATION",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable record of a user action, as handed to the audit sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The user who performed the action.
    pub actor_id: Uuid,
    /// Display name of the actor at the time of the action.
    pub actor_name: String,
    /// Role of the actor at the time of the action.
    pub actor_role: String,
    /// The action that was performed.
    pub action: AuditAction,
    /// The resource the action targeted (if applicable).
    pub target_id: Option<Uuid>,
    /// A human-readable summary line.
    pub details: String,
    /// State before the action (JSON).
    pub old_value: Option<serde_json::Value>,
    /// State after the action (JSON).
    pub new_value: Option<serde_json::Value>,
}

/// Destination for audit events.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Record a single audit event.
    async fn record_event(&self, event: AuditEvent) -> AppResult<()>;
}
