//! Error types for the event store.

use riskwatch_types::PolicyId;

/// Errors that can occur when building or querying an [`EventStore`](crate::EventStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record has the requested policy identifier.
    #[error("policy not found: {policy_id}")]
    NotFound {
        /// The identifier that was looked up.
        policy_id: String,
    },

    /// Two seed records share a policy identifier.
    #[error("duplicate policy id: {policy_id}")]
    DuplicatePolicy {
        /// The repeated identifier.
        policy_id: PolicyId,
    },

    /// A seed record failed validation.
    #[error("invalid risk event {policy_id:?}: {reason}")]
    InvalidRecord {
        /// Identifier of the offending record (may be empty).
        policy_id: PolicyId,
        /// Human-readable validation failure.
        reason: String,
    },

    /// The seed file could not be read.
    #[error("failed to read seed file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The seed file is not a JSON array of risk events.
    #[error("failed to parse seed JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
