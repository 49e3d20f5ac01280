//! HTTP access to the risk event API.
//!
//! Every request carries the configured timeout. Failures are split into
//! transport problems, unexpected statuses, undecodable bodies, and
//! records that break the data model, so callers can tell "the service is
//! down" apart from "the service sent garbage".

use std::collections::BTreeSet;

use reqwest::{StatusCode, Url};
use riskwatch_types::RiskEvent;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Error message the service sends with a 404 for an unknown policy.
const POLICY_NOT_FOUND: &str = "Policy not found";

/// JSON error body returned by the service, `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for `GET /risk-events` and `GET /risk-events/{policy_id}`.
#[derive(Debug, Clone)]
pub struct RiskEventClient {
    client: reqwest::Client,
    base_url: Url,
}

impl RiskEventClient {
    /// Create a client for the configured base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the base URL does not parse or
    /// the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL {}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base URL cannot have paths appended: {base_url}"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// The base URL requests are made against.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch every risk event.
    ///
    /// The returned records are validated and must have unique policy
    /// identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] on network failure or timeout,
    /// [`ClientError::Status`] on a non-2xx response,
    /// [`ClientError::Decode`] if the body is not a JSON array of risk
    /// events, and [`ClientError::InvalidData`] if a record is invalid.
    pub async fn fetch_risk_events(&self) -> Result<Vec<RiskEvent>, ClientError> {
        let url = self.endpoint(&["risk-events"])?;
        let events: Vec<RiskEvent> = self.get_json(url).await?;

        let mut seen = BTreeSet::new();
        for event in &events {
            check_record(event)?;
            if !seen.insert(event.policy_id.as_str()) {
                return Err(ClientError::InvalidData(format!(
                    "duplicate policy_id {}",
                    event.policy_id
                )));
            }
        }

        debug!(count = events.len(), "Fetched risk events");
        Ok(events)
    }

    /// Fetch the risk event for one policy.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the service answers 404 with
    /// its "Policy not found" body. Any other 404 (a wrong base path, a
    /// proxy page) stays a [`ClientError::Status`]. Otherwise the same
    /// failures as [`RiskEventClient::fetch_risk_events`].
    pub async fn get_risk_event(&self, policy_id: &str) -> Result<RiskEvent, ClientError> {
        let url = self.endpoint(&["risk-events", policy_id])?;
        let event: RiskEvent = match self.get_json(url).await {
            Err(ClientError::Status { status, body })
                if status == StatusCode::NOT_FOUND.as_u16() && is_policy_not_found(&body) =>
            {
                return Err(ClientError::NotFound {
                    policy_id: policy_id.to_owned(),
                });
            }
            other => other?,
        };
        check_record(&event)?;
        Ok(event)
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::Config(format!("base URL cannot have paths appended: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue a GET and decode a JSON body, mapping failures by kind.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("GET {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(format!("reading body of {url} failed: {e}")))?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body)
            .map_err(|e| ClientError::Decode(format!("GET {url}: {e}")))
    }
}

/// Whether a 404 body is the service's own unknown-policy answer.
fn is_policy_not_found(body: &str) -> bool {
    serde_json::from_str::<ErrorBody>(body).is_ok_and(|b| b.error == POLICY_NOT_FOUND)
}

/// Reject records that break the data model.
fn check_record(event: &RiskEvent) -> Result<(), ClientError> {
    event
        .validate()
        .map_err(|e| ClientError::InvalidData(format!("policy {:?}: {e}", event.policy_id.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(base: &str, segments: &[&str]) -> Option<String> {
        RiskEventClient::new(&ClientConfig::new(base))
            .and_then(|client| client.endpoint(segments))
            .ok()
            .map(String::from)
    }

    #[test]
    fn endpoint_appends_segments() {
        assert_eq!(
            endpoint("http://localhost:8000", &["risk-events"]).as_deref(),
            Some("http://localhost:8000/risk-events")
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        assert_eq!(
            endpoint("http://gateway/api/v1/", &["risk-events", "P12345"]).as_deref(),
            Some("http://gateway/api/v1/risk-events/P12345")
        );
    }

    #[test]
    fn endpoint_encodes_policy_ids() {
        assert_eq!(
            endpoint("http://localhost:8000", &["risk-events", "P 1/2?x"]).as_deref(),
            Some("http://localhost:8000/risk-events/P%201%2F2%3Fx")
        );
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let result = RiskEventClient::new(&ClientConfig::new("not a url"));
        assert!(matches!(result, Err(ClientError::Config(_))));

        let result = RiskEventClient::new(&ClientConfig::new("mailto:risk@example.com"));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn only_the_service_body_means_policy_not_found() {
        assert!(is_policy_not_found(r#"{"error": "Policy not found"}"#));
        assert!(!is_policy_not_found(""));
        assert!(!is_policy_not_found("<html>Not Found</html>"));
        assert!(!is_policy_not_found(r#"{"error": "No risk events to analyze"}"#));
    }
}
