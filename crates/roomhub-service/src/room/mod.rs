//! Room registry and availability search.

pub mod availability;
pub mod service;

pub use availability::AvailabilityService;
pub use service::RoomService;
