//! Reporting CLI for the risk event API.
//!
//! Fetches the catalog from a running risk event API, prints the records,
//! the per-location analysis, and the portfolio report as JSON, and writes
//! the chart page to disk.
//!
//! Configuration comes from `RISKWATCH_API_URL`, `RISKWATCH_TIMEOUT_MS`,
//! and `RISKWATCH_CHART_PATH`. Any failure (service unreachable, empty
//! catalog, malformed data) exits non-zero with a message naming the step
//! that failed.

use anyhow::Context;
use riskwatch_analytics::AnalyticsError;
use riskwatch_client::{ClientConfig, ClientError, RiskEventAnalyzer, RiskEventClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env().context("loading client configuration")?;
    info!(base_url = config.base_url, timeout_ms = ?config.timeout, "Client configured");

    let client = RiskEventClient::new(&config).context("building HTTP client")?;
    let analyzer = RiskEventAnalyzer::new(client);

    let events = analyzer
        .events()
        .await
        .with_context(|| format!("fetching risk events from {}", config.base_url))?;
    println!("Fetched Risk Events:");
    println!("{}", serde_json::to_string_pretty(events)?);

    let by_location = analyzer
        .analyze_risk_by_location()
        .await
        .context("analyzing risk by location")?;
    println!("\nRisk by Location:");
    println!("{}", serde_json::to_string_pretty(&by_location)?);

    let report = match analyzer.generate_risk_report().await {
        Ok(report) => report,
        Err(ClientError::Analytics(AnalyticsError::EmptyInput)) => {
            anyhow::bail!("the risk event API returned no risk events; nothing to report")
        }
        Err(e) => return Err(e).context("generating risk report"),
    };
    println!("\nRisk Report:");
    println!("{}", serde_json::to_string_pretty(&report)?);

    let html = analyzer
        .render_charts_html()
        .await
        .context("rendering risk charts")?;
    tokio::fs::write(&config.chart_path, html)
        .await
        .with_context(|| format!("writing charts to {}", config.chart_path.display()))?;
    println!("\nCharts written to {}", config.chart_path.display());

    Ok(())
}
