//! Configuration types for the risk event client.
//!
//! All configuration is loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ClientError;

/// Default base URL of the risk event API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default output path for the chart page.
pub const DEFAULT_CHART_PATH: &str = "risk_charts.html";

/// Complete client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the risk event API, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout, covering connect through body read.
    pub timeout: Duration,
    /// Where the reporting CLI writes the chart page.
    pub chart_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            chart_path: PathBuf::from(DEFAULT_CHART_PATH),
        }
    }
}

impl ClientConfig {
    /// Configuration for a given base URL with default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_base_url(base_url.into()),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `RISKWATCH_API_URL` -- base URL (default `http://localhost:8000`)
    /// - `RISKWATCH_TIMEOUT_MS` -- request timeout (default 10000)
    /// - `RISKWATCH_CHART_PATH` -- chart output file (default `risk_charts.html`)
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the timeout is not a positive
    /// integer.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let base_url = lookup("RISKWATCH_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        let timeout_ms: u64 = lookup("RISKWATCH_TIMEOUT_MS")
            .unwrap_or_else(|| DEFAULT_TIMEOUT_MS.to_string())
            .parse()
            .map_err(|e| ClientError::Config(format!("invalid RISKWATCH_TIMEOUT_MS: {e}")))?;
        if timeout_ms == 0 {
            return Err(ClientError::Config(
                "RISKWATCH_TIMEOUT_MS must be greater than zero".to_owned(),
            ));
        }

        let chart_path = lookup("RISKWATCH_CHART_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_CHART_PATH), PathBuf::from);

        Ok(Self {
            base_url: trim_base_url(base_url),
            timeout: Duration::from_millis(timeout_ms),
            chart_path,
        })
    }

    /// Replace the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn trim_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
