//! Query service for the Riskwatch catalog.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Risk event endpoints** (`/risk-events`, `/risk-events/{policy_id}`)
//!   listing the catalog and looking up a single policy
//! - **Analytics endpoints** (`/analytics/locations`, `/analytics/report`,
//!   `/analytics/charts`) computed on demand over the whole store
//! - **Minimal HTML index** (`GET /`) listing the endpoints
//!
//! # Architecture
//!
//! The server owns a read-only [`EventStore`] behind an [`Arc`]. The store
//! is never mutated after startup, so handlers read it without locking.
//!
//! [`EventStore`]: riskwatch_store::EventStore
//! [`Arc`]: std::sync::Arc

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::{StartupError, spawn_server};
pub use state::AppState;
