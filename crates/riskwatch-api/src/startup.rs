//! Background startup helper for embedding the query service.
//!
//! Provides [`spawn_server`] which binds eagerly and then serves on a
//! background Tokio task. Binding before spawning means address errors
//! surface to the caller, and a port of `0` resolves to the real port
//! before the function returns.
//!
//! # Usage
//!
//! ```rust,ignore
//! use riskwatch_api::{AppState, ServerConfig, spawn_server};
//! use riskwatch_store::EventStore;
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(EventStore::seeded()?));
//! let (addr, handle) = spawn_server(&ServerConfig::default(), state).await?;
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{self, ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the query service.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Bind the query service and serve it on a background Tokio task.
///
/// Returns the bound address and a [`JoinHandle`] so the caller can
/// abort or await the server.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the address is invalid or cannot
/// be bound.
pub async fn spawn_server(
    config: &ServerConfig,
    state: Arc<AppState>,
) -> Result<(SocketAddr, JoinHandle<()>), StartupError> {
    let listener = server::bind(config).await?;
    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("listener has no local address: {e}")))?;

    let handle = tokio::spawn(async move {
        if let Err(e) = server::serve(listener, state).await {
            tracing::error!(error = %e, "Risk event API exited with error");
        }
    });

    tracing::info!(%addr, "Risk event API spawned on background task");

    Ok((addr, handle))
}
