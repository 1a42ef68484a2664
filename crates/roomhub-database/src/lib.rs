//! # roomhub-database
//!
//! PostgreSQL connection management, the store traits the business layer
//! programs against, and their concrete implementations: Postgres-backed
//! repositories for deployment and in-memory stores for single-node tests.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use store::{ReservationStore, RoomStore};
