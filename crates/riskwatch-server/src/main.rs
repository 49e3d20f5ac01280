//! Risk event API binary.
//!
//! Wires together configuration, logging, the event store, and the HTTP
//! query service, then serves until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `riskwatch.yaml` plus environment overrides
//! 2. Initialize structured logging (tracing)
//! 3. Seed the event store (seed file or built-in policies)
//! 4. Serve the HTTP API

mod config;
mod error;

use std::sync::Arc;

use riskwatch_api::{AppState, ServerConfig};
use riskwatch_store::EventStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig, Settings};
use crate::error::AppError;

/// Application entry point for the risk event API.
///
/// # Errors
///
/// Returns an error if configuration, seeding, or the server fails.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration. Logging is not up yet, so failures surface
    //    through the returned error.
    let settings = Settings::load()?;

    // 2. Initialize structured logging.
    init_logging(&settings.logging);
    info!("riskwatch-server starting");
    info!(
        host = settings.server.host,
        port = settings.server.port,
        seed_file = ?settings.seed_file,
        "Configuration loaded"
    );

    // 3. Seed the event store.
    let store = match &settings.seed_file {
        Some(path) => EventStore::from_json_file(path)?,
        None => EventStore::seeded()?,
    };
    info!(policies = store.len(), "Event store ready");

    // 4. Serve.
    let state = Arc::new(AppState::new(store));
    let server_config = ServerConfig::from(&settings.server);
    riskwatch_api::start_server(&server_config, state).await?;

    info!("riskwatch-server stopped");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}
