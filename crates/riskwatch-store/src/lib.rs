//! Read-only, in-memory event store for the Riskwatch catalog.
//!
//! The [`EventStore`] is built once at startup (from the built-in seed or
//! a JSON seed file) and never mutated afterwards. It is shared with the
//! query service behind an `Arc` and needs no locking.
//!
//! # Modules
//!
//! - [`store`] -- The [`EventStore`] itself
//! - [`seed`] -- Built-in seed policies
//! - [`error`] -- [`StoreError`]

pub mod error;
pub mod seed;
pub mod store;

pub use error::StoreError;
pub use seed::seed_events;
pub use store::EventStore;
