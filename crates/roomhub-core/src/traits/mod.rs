//! Core trait definitions shared across the RoomHub workspace.

pub mod audit;
pub mod clock;

pub use audit::{AuditAction, AuditEvent, AuditSink};
pub use clock::{Clock, ManualClock, SystemClock};
