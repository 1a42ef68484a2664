//! Background reservation lifecycle processing for RoomHub.
//!
//! This crate provides:
//! - The idempotent sweep that completes expired reservations
//! - A cron scheduler that runs the sweep on a fixed cadence

pub mod scheduler;
pub mod sweeper;

pub use scheduler::CronScheduler;
pub use sweeper::ReservationSweeper;
