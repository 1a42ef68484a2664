//! # roomhub-core
//!
//! Core crate for RoomHub. Contains traits, configuration schemas,
//! the audit event types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other RoomHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
