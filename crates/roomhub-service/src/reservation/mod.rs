//! Reservation creation, listing, and cancellation.

pub mod conflict;
pub mod service;

pub use conflict::{ConflictResolver, RoomRef};
pub use service::{CreateReservationRequest, ReservationService};
