//! Room entity.

pub mod model;

pub use model::{CreateRoom, Room, UpdateRoom};
