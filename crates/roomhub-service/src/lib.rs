//! # roomhub-service
//!
//! Business logic service layer for RoomHub. Each service orchestrates the
//! store traits and the audit sink to implement application-level use cases:
//! the room registry, reservation creation and cancellation, availability
//! search, and the conflict-resolution engine.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. Authentication runs in the
//! transport layer above this crate; every operation receives the
//! already-authenticated caller as a [`RequesterContext`].

pub mod context;
pub mod locks;
pub mod reservation;
pub mod room;

pub use context::{RequesterContext, RequesterRole};
pub use locks::RoomLocks;
pub use reservation::{ConflictResolver, CreateReservationRequest, ReservationService, RoomRef};
pub use room::{AvailabilityService, RoomService};
