//! REST API endpoint handlers for the query service.
//!
//! All handlers read from the shared, read-only
//! [`EventStore`](riskwatch_store::EventStore) via [`AppState`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML index |
//! | `GET` | `/risk-events` | List all risk events |
//! | `GET` | `/risk-events/{policy_id}` | Get a single risk event |
//! | `GET` | `/analytics/locations` | Per-location statistics |
//! | `GET` | `/analytics/report` | Portfolio risk report |
//! | `GET` | `/analytics/charts` | HTML page with the four charts |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use riskwatch_analytics::{ChartGrid, generate_report, group_by_location, render_html};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML index
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the catalog size and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let policy_count = state.store.len();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Risk Event API</title>
    <style>
        body {{
            font-family: 'Helvetica Neue', Arial, sans-serif;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        .subtitle {{ color: #57606a; margin-top: 0; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "GET "; color: #1a7f37; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>Risk Event API</h1>
    <p class="subtitle">Risk events for actuarial analytics</p>

    <p>Policies in catalog: <strong>{policy_count}</strong></p>

    <h2>Risk Events</h2>
    <ul>
        <li><a href="/risk-events">/risk-events</a> -- All risk events</li>
        <li><a href="/risk-events/P12345">/risk-events/{{policy_id}}</a> -- Risk event by policy ID</li>
    </ul>

    <h2>Analytics</h2>
    <ul>
        <li><a href="/analytics/locations">/analytics/locations</a> -- Statistics per insured location</li>
        <li><a href="/analytics/report">/analytics/report</a> -- Portfolio risk report</li>
        <li><a href="/analytics/charts">/analytics/charts</a> -- Risk distribution charts</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /risk-events -- list all
// ---------------------------------------------------------------------------

/// Return every risk event in seed order as a JSON array.
///
/// Always succeeds; an empty store yields `[]`.
pub async fn list_risk_events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.list_all().to_vec())
}

// ---------------------------------------------------------------------------
// GET /risk-events/{policy_id} -- single event
// ---------------------------------------------------------------------------

/// Return the risk event for one policy.
///
/// Unknown identifiers (including malformed ones) produce 404 with
/// `{"error": "Policy not found"}`.
pub async fn get_risk_event(
    State(state): State<Arc<AppState>>,
    Path(policy_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let event = state.store.get(&policy_id)?;
    Ok(Json(event.clone()))
}

// ---------------------------------------------------------------------------
// GET /analytics/* -- aggregates over the whole store
// ---------------------------------------------------------------------------

/// Per-location count, total, mean, and event-type breakdown.
pub async fn location_analysis(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let grouped = group_by_location(state.store.list_all())?;
    Ok(Json(grouped))
}

/// The portfolio risk report. 422 when the store is empty.
pub async fn risk_report(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let report = generate_report(state.store.list_all())?;
    Ok(Json(report))
}

/// HTML page with the 2x2 chart grid. 422 when the store is empty.
pub async fn risk_charts(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let grid = ChartGrid::from_events(state.store.list_all())?;
    let html = render_html(&grid, "Risk Event Distribution")?;
    Ok(Html(html))
}
