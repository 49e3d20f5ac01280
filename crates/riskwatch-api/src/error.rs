//! Error types for the query service.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error body has the shape `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use riskwatch_analytics::AnalyticsError;
use riskwatch_store::StoreError;

/// Errors that can occur in the query service layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No risk event has the requested policy identifier.
    #[error("Policy not found")]
    PolicyNotFound {
        /// The identifier from the request path.
        policy_id: String,
    },

    /// An aggregate was requested over an empty store.
    #[error("No risk events to analyze")]
    EmptyInput,

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { policy_id } => Self::PolicyNotFound { policy_id },
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::EmptyInput => Self::EmptyInput,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::PolicyNotFound { policy_id } => {
                tracing::debug!(policy_id, "Policy not found");
                StatusCode::NOT_FOUND
            }
            Self::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(msg) => {
                tracing::error!(error = msg, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}
