//! Per-room critical sections for the check-then-insert sequence.
//!
//! The conflict check and the subsequent insert are not atomic at the
//! store level; without coordination two concurrent requests for the same
//! slot could both pass the check. Creation holds the room's lock across
//! both steps so at most one of any pair of overlapping requests wins.
//! Single logical process assumed.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Lazily allocated advisory locks keyed by room id.
#[derive(Debug, Default)]
pub struct RoomLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl RoomLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a room, waiting if another creation for the
    /// same room is in flight. The guard releases on drop.
    pub async fn acquire(&self, room_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = self.locks.entry(room_id).or_default().clone();
        lock.lock_owned().await
    }
}
