//! Axum router construction for the query service.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware enabled.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the query service.
///
/// The router includes:
/// - `GET /` -- minimal HTML index
/// - `GET /risk-events` -- list risk events
/// - `GET /risk-events/{policy_id}` -- single risk event
/// - `GET /analytics/locations` -- per-location statistics
/// - `GET /analytics/report` -- portfolio risk report
/// - `GET /analytics/charts` -- chart page
///
/// CORS allows any origin so notebooks and dashboards on other hosts can
/// read the catalog.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Index page
        .route("/", get(handlers::index))
        // Risk events
        .route("/risk-events", get(handlers::list_risk_events))
        .route("/risk-events/{policy_id}", get(handlers::get_risk_event))
        // Analytics
        .route("/analytics/locations", get(handlers::location_analysis))
        .route("/analytics/report", get(handlers::risk_report))
        .route("/analytics/charts", get(handlers::risk_charts))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
