//! Request context carrying the authenticated caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomhub_core::traits::{AuditAction, AuditEvent};

/// Role of the caller, as asserted by the auth layer above this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequesterRole {
    /// Administrators manage rooms and may cancel any reservation.
    Admin,
    /// Regular employees book rooms and manage their own reservations.
    Employee,
}

impl RequesterRole {
    /// Return the role as its stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Employee => "EMPLOYEE",
        }
    }
}

/// Context for the current authenticated request.
///
/// Built by the transport layer after authentication and passed into every
/// core operation so the services know *who* is acting. The core never
/// reconstructs the actor from loosely typed fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequesterContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// Display name, carried for audit records.
    pub display_name: String,
    /// The user's role at the time the request was authenticated.
    pub role: RequesterRole,
}

impl RequesterContext {
    /// Creates a new requester context.
    pub fn new(user_id: Uuid, display_name: impl Into<String>, role: RequesterRole) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            role,
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, RequesterRole::Admin)
    }

    /// Builds an audit event attributed to this caller.
    pub fn audit_event(
        &self,
        action: AuditAction,
        target_id: Option<Uuid>,
        details: impl Into<String>,
        old_value: Option<serde_json::Value>,
        new_value: Option<serde_json::Value>,
    ) -> AuditEvent {
        AuditEvent {
            actor_id: self.user_id,
            actor_name: self.display_name.clone(),
            actor_role: self.role.as_str().to_string(),
            action,
            target_id,
            details: details.into(),
            old_value,
            new_value,
        }
    }
}
