//! RMA portal refresh poller.
//!
//! Loads configuration, connects to the REST store and keeps the
//! notification feeds and dashboard figures fresh until shut down.

mod poller;

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use rma_core::config::AppConfig;
use rma_core::error::AppError;
use rma_core::traits::{Clock, SystemClock};
use rma_store::{HttpNotificationRepository, HttpTicketRepository, StoreClient};
use rma_service::{DashboardService, NotificationEngine};

use poller::Poller;

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
        tracing::error!("Poller error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    if let Ok(path) = std::env::var("RMA_CONFIG") {
        return AppConfig::load_file(&path);
    }
    let env = std::env::var("RMA_ENV").unwrap_or_else(|_| "development".to_string());
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

/// Wire the services and poll until a shutdown signal arrives
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting RMA poller v{}", env!("CARGO_PKG_VERSION"));

    let client = StoreClient::connect(&config.store)?;
    match client.health_check().await {
        Ok(true) => tracing::info!(store = client.base_url(), "Store reachable"),
        Ok(false) | Err(_) => {
            tracing::warn!(store = client.base_url(), "Store not reachable yet, will keep polling")
        }
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let notifications = NotificationEngine::new(
        Arc::new(HttpNotificationRepository::new(client.clone())),
        clock,
        &config.notifications,
    );
    let dashboard = DashboardService::new(Arc::new(HttpTicketRepository::new(client)));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = Arc::new(Poller::new(notifications, dashboard, config.polling.interval()));
    let handle = tokio::spawn(poller.run(shutdown_rx));

    shutdown_signal().await;
    tracing::info!("Shutdown signal received");
    let _ = shutdown_tx.send(true);

    handle
        .await
        .map_err(|e| AppError::internal(format!("Poller task failed: {}", e)))?;

    tracing::info!("RMA poller stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
