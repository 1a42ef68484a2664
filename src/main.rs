//! RoomHub Daemon — Meeting Room Reservation Backend
//!
//! Wires the database, repositories, and background sweeper together and
//! runs the reservation lifecycle until a shutdown signal arrives. The
//! booking, room, and availability services live in the workspace crates
//! and are embedded by whatever front end sits on top of this backend.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use roomhub_core::config::AppConfig;
use roomhub_core::error::AppError;
use roomhub_core::traits::SystemClock;
use roomhub_database::ReservationStore;
use roomhub_database::repositories::reservation::ReservationRepository;
use roomhub_worker::{CronScheduler, ReservationSweeper};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Daemon error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("ROOMHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main daemon run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting RoomHub v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let db_pool = roomhub_database::connection::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    roomhub_database::migration::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations complete");

    let reservation_repo: Arc<dyn ReservationStore> =
        Arc::new(ReservationRepository::new(db_pool.clone()));
    let clock = Arc::new(SystemClock);

    let mut scheduler = if config.sweeper.enabled {
        let sweeper = Arc::new(ReservationSweeper::new(
            Arc::clone(&reservation_repo),
            clock,
        ));

        let scheduler = CronScheduler::new(sweeper, config.sweeper.clone()).await?;
        scheduler.register_reservation_sweep().await?;
        scheduler.start().await?;

        tracing::info!("Reservation sweeper started");
        Some(scheduler)
    } else {
        tracing::info!("Reservation sweeper disabled");
        None
    };

    tracing::info!("RoomHub daemon running");

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, starting graceful shutdown...");

    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.shutdown().await?;
    }

    db_pool.close().await;
    tracing::info!("RoomHub daemon shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
