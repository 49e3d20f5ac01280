//! Shared type definitions for the Riskwatch catalog.
//!
//! This crate is the single source of truth for the records served by the
//! query service and the aggregates produced by the analytics engine.
//! Types flow downstream to `TypeScript` via `ts-rs` for the reporting
//! dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- The [`PolicyId`] key wrapper
//! - [`event`] -- The immutable [`RiskEvent`] record and its validation rules
//! - [`report`] -- Per-location aggregates and the structured [`RiskReport`]

pub mod event;
pub mod ids;
pub mod report;

// Re-export all public types at crate root for convenience.
pub use event::RiskEvent;
pub use ids::PolicyId;
pub use report::{LocationStats, LocationSummary, RiskMetrics, RiskReport};
