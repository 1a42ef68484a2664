//! Repository implementations for the RoomHub stores.

pub mod audit;
pub mod memory;
pub mod reservation;
pub mod room;

pub use audit::AuditLogRepository;
pub use memory::{MemoryAuditSink, MemoryReservationStore, MemoryRoomStore};
pub use reservation::ReservationRepository;
pub use room::RoomRepository;
