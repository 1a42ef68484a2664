//! The reservation lifecycle sweeper.

use std::sync::Arc;

use tracing::{debug, info};

use roomhub_core::result::AppResult;
use roomhub_core::traits::Clock;
use roomhub_database::ReservationStore;

/// Promotes approved reservations whose end time has passed into the
/// terminal `Completed` state.
///
/// The sweep is a single bulk update and is idempotent: running it twice
/// without time passing changes nothing the second time. It never touches
/// cancelled reservations, and a reservation still in progress (started,
/// not yet ended) is left alone. A failed sweep self-heals on the next
/// tick because the predicate is re-evaluated from scratch.
#[derive(Clone)]
pub struct ReservationSweeper {
    reservations: Arc<dyn ReservationStore>,
    clock: Arc<dyn Clock>,
}

impl ReservationSweeper {
    /// Creates a new sweeper.
    pub fn new(reservations: Arc<dyn ReservationStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            reservations,
            clock,
        }
    }

    /// Run one sweep. Returns the number of reservations completed.
    pub async fn sweep(&self) -> AppResult<u64> {
        let now = self.clock.now();
        debug!(%now, "Checking for expired reservations");

        let completed = self.reservations.complete_expired(now).await?;

        if completed > 0 {
            info!(completed, "Archived expired reservations");
        }

        Ok(completed)
    }
}
