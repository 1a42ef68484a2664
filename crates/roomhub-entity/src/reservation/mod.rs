//! Reservation entity.

pub mod model;
pub mod status;

pub use model::{CreateReservation, Reservation, ReservationFilter};
pub use status::ReservationStatus;
