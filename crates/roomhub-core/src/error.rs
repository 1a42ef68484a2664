//! Unified application error types for RoomHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
///
/// The booking-specific kinds mirror the rejections the reservation core can
/// produce; the remaining kinds cover infrastructure concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The reservation interval is degenerate or inverted (start >= end).
    InvalidInterval,
    /// The reservation would start in the past.
    PastBooking,
    /// The target room does not exist.
    RoomNotFound,
    /// The target room has been deactivated.
    RoomInactive,
    /// The requested slot conflicts with an existing reservation.
    SlotUnavailable,
    /// The reservation does not exist.
    ReservationNotFound,
    /// The reservation is already in a terminal state.
    AlreadyCancelled,
    /// The caller is neither an admin nor the owner of the reservation.
    Forbidden,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, referential-integrity guard, etc.).
    Conflict,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInterval => write!(f, "INVALID_INTERVAL"),
            Self::PastBooking => write!(f, "PAST_BOOKING"),
            Self::RoomNotFound => write!(f, "ROOM_NOT_FOUND"),
            Self::RoomInactive => write!(f, "ROOM_INACTIVE"),
            Self::SlotUnavailable => write!(f, "SLOT_UNAVAILABLE"),
            Self::ReservationNotFound => write!(f, "RESERVATION_NOT_FOUND"),
            Self::AlreadyCancelled => write!(f, "ALREADY_CANCELLED"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout RoomHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. Every rejection carries a kind so callers
/// can act on it; `details` holds structured data such as the next-available
/// instant of a [`ErrorKind::SlotUnavailable`] rejection.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// Optional structured payload for the caller.
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            details: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
            details: None,
        }
    }

    /// Attach a structured payload to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Create an invalid-interval error.
    pub fn invalid_interval(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInterval, message)
    }

    /// Create a past-booking error.
    pub fn past_booking(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PastBooking, message)
    }

    /// Create a room-not-found error.
    pub fn room_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RoomNotFound, message)
    }

    /// Create a room-inactive error.
    pub fn room_inactive(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RoomInactive, message)
    }

    /// Create a slot-unavailable error carrying the instant the room frees up.
    pub fn slot_unavailable(room_name: &str, next_available: DateTime<Utc>) -> Self {
        Self::new(
            ErrorKind::SlotUnavailable,
            format!(
                "Room '{}' is unavailable in the requested window; it frees up at {}",
                room_name,
                next_available.to_rfc3339()
            ),
        )
        .with_details(serde_json::json!({
            "next_available": next_available.to_rfc3339(),
        }))
    }

    /// Create a reservation-not-found error.
    pub fn reservation_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ReservationNotFound, message)
    }

    /// Create an already-cancelled error.
    pub fn already_cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyCancelled, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Parse the `next_available` instant out of a slot-unavailable error.
    pub fn next_available(&self) -> Option<DateTime<Utc>> {
        self.details
            .as_ref()?
            .get("next_available")?
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| t.with_timezone(&Utc))
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
            details: self.details.clone(),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
