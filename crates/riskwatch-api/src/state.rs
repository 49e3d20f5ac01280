//! Shared application state for the query service.
//!
//! [`AppState`] holds the read-only [`EventStore`]. It is wrapped in an
//! [`Arc`] and injected via Axum's `State` extractor; because the store is
//! immutable after startup, no lock is needed.

use std::sync::Arc;

use riskwatch_store::EventStore;

/// Shared state for the Axum application.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The canonical, read-only event store.
    pub store: Arc<EventStore>,
}

impl AppState {
    /// Create application state around an already-built store.
    pub fn new(store: EventStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create application state sharing an existing store handle.
    pub const fn from_shared(store: Arc<EventStore>) -> Self {
        Self { store }
    }
}
