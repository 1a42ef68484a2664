//! Cron scheduler driving the reservation sweep.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use roomhub_core::config::sweeper::SweeperConfig;
use roomhub_core::error::AppError;

use crate::sweeper::ReservationSweeper;

/// Cron-based scheduler for the periodic reservation sweep.
///
/// The sweeper itself is a plain callable, so tests trigger it directly;
/// this scheduler only supplies the production cadence.
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// The sweeper invoked on every tick
    sweeper: Arc<ReservationSweeper>,
    /// Cron cadence configuration
    config: SweeperConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(
        sweeper: Arc<ReservationSweeper>,
        config: SweeperConfig,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            sweeper,
            config,
        })
    }

    /// Register the reservation sweep on its configured schedule
    pub async fn register_reservation_sweep(&self) -> Result<(), AppError> {
        let sweeper = Arc::clone(&self.sweeper);
        let job = CronJob::new_async(self.config.schedule.as_str(), move |_uuid, _lock| {
            let sweeper = Arc::clone(&sweeper);
            Box::pin(async move {
                // A missed or failed sweep self-heals on the next tick.
                if let Err(e) = sweeper.sweep().await {
                    tracing::error!("Reservation sweep failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create reservation_sweep schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add reservation_sweep schedule: {}", e))
        })?;

        tracing::info!(
            "Registered: reservation_sweep ({})",
            self.config.schedule
        );
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}
