//! Error types for the risk event client.
//!
//! Uses `thiserror` for typed errors that surface through the whole
//! fetch-and-analyze pipeline: transport, HTTP status, decoding, data
//! validation, and analytics.

use riskwatch_analytics::AnalyticsError;

/// Errors that can occur while fetching or analyzing risk events.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read
    /// (connection refused, DNS failure, timeout, broken body).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service has no risk event with this policy identifier.
    #[error("policy not found: {policy_id}")]
    NotFound {
        /// The identifier that was requested.
        policy_id: String,
    },

    /// The service answered with a non-success status.
    #[error("risk event API returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("response decode error: {0}")]
    Decode(String),

    /// The service returned records that break the data model.
    #[error("invalid risk event data: {0}")]
    InvalidData(String),

    /// Aggregation over the fetched records failed.
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),
}
