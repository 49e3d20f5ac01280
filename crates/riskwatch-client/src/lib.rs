//! Remote-fetch client for the Riskwatch risk event API.
//!
//! [`RiskEventClient`] talks to the query service over HTTP with a bounded
//! timeout. [`RiskEventAnalyzer`] sits on top of it, fetches the catalog
//! once, and runs the analytics engine over the cached copy.
//!
//! # Modules
//!
//! - [`config`] -- [`ClientConfig`] loaded from the environment
//! - [`client`] -- HTTP access to `/risk-events`
//! - [`analyzer`] -- Cached analysis over the fetched catalog
//! - [`error`] -- [`ClientError`]

pub mod analyzer;
pub mod client;
pub mod config;
pub mod error;

pub use analyzer::RiskEventAnalyzer;
pub use client::RiskEventClient;
pub use config::ClientConfig;
pub use error::ClientError;
