//! Cached analysis over the fetched risk event catalog.
//!
//! The analyzer fetches the full catalog on first use and keeps it for
//! its whole lifetime. The catalog is static on the service side, so the
//! cache is never invalidated; build a new analyzer to refetch. A failed
//! fetch leaves the cache empty and the next call tries again.

use std::collections::BTreeMap;

use riskwatch_analytics::{ChartGrid, generate_report, group_by_location, render_html};
use riskwatch_types::{LocationStats, RiskEvent, RiskReport};
use tokio::sync::OnceCell;
use tracing::info;

use crate::client::RiskEventClient;
use crate::error::ClientError;

/// Title used for the rendered chart page.
const CHART_PAGE_TITLE: &str = "Risk Event Distribution";

/// Fetch-once analyzer for the remote catalog.
#[derive(Debug)]
pub struct RiskEventAnalyzer {
    client: RiskEventClient,
    events: OnceCell<Vec<RiskEvent>>,
}

impl RiskEventAnalyzer {
    /// Create an analyzer with an empty cache.
    pub fn new(client: RiskEventClient) -> Self {
        Self {
            client,
            events: OnceCell::new(),
        }
    }

    /// The underlying HTTP client, for one-off lookups.
    pub const fn client(&self) -> &RiskEventClient {
        &self.client
    }

    /// The cached catalog, fetching it on first call.
    ///
    /// # Errors
    ///
    /// Propagates any [`RiskEventClient::fetch_risk_events`] failure.
    pub async fn events(&self) -> Result<&[RiskEvent], ClientError> {
        let events = self
            .events
            .get_or_try_init(|| async {
                let events = self.client.fetch_risk_events().await?;
                info!(count = events.len(), "Risk event catalog cached");
                Ok::<_, ClientError>(events)
            })
            .await?;
        Ok(events.as_slice())
    }

    /// Returns `true` once the catalog has been fetched.
    pub fn is_cached(&self) -> bool {
        self.events.initialized()
    }

    /// Per-location statistics over the catalog.
    ///
    /// # Errors
    ///
    /// Returns a fetch error, or [`ClientError::Analytics`] on overflow.
    pub async fn analyze_risk_by_location(
        &self,
    ) -> Result<BTreeMap<String, LocationStats>, ClientError> {
        let events = self.events().await?;
        Ok(group_by_location(events)?)
    }

    /// The portfolio risk report over the catalog.
    ///
    /// # Errors
    ///
    /// Returns a fetch error, or [`ClientError::Analytics`] wrapping
    /// `EmptyInput` when the catalog is empty.
    pub async fn generate_risk_report(&self) -> Result<RiskReport, ClientError> {
        let events = self.events().await?;
        Ok(generate_report(events)?)
    }

    /// Chart-ready series for the four reporting views.
    ///
    /// # Errors
    ///
    /// Same as [`RiskEventAnalyzer::generate_risk_report`].
    pub async fn chart_grid(&self) -> Result<ChartGrid, ClientError> {
        let events = self.events().await?;
        Ok(ChartGrid::from_events(events)?)
    }

    /// Standalone HTML page with the 2x2 chart grid.
    ///
    /// # Errors
    ///
    /// Same as [`RiskEventAnalyzer::chart_grid`], plus render failures.
    pub async fn render_charts_html(&self) -> Result<String, ClientError> {
        let grid = self.chart_grid().await?;
        Ok(render_html(&grid, CHART_PAGE_TITLE)?)
    }
}
