//! Analytics engine for the Riskwatch catalog.
//!
//! Everything here is a pure function of a slice of
//! [`RiskEvent`](riskwatch_types::RiskEvent)s: no fetching, no caching, no
//! I/O. Callers decide where the events come from (the in-process store or
//! the remote query service).
//!
//! # Modules
//!
//! - [`aggregate`] -- Location grouping and the structured risk report
//! - [`charts`] -- Chart-ready series for the four reporting views
//! - [`render`] -- HTML page with a 2x2 grid of inline SVG charts
//! - [`error`] -- [`AnalyticsError`]
//!
//! # Tie-breaking
//!
//! - `highest_value_location`: among locations with equal totals, the one
//!   that appears first in the input wins.
//! - `most_common_event`: among event types with equal counts, the
//!   lexicographically smallest wins.

pub mod aggregate;
pub mod charts;
pub mod error;
pub mod render;

pub use aggregate::{generate_report, group_by_location, total_property_value};
pub use charts::{BarChart, ChartGrid, Histogram, HistogramBin, Series, StackedBarChart};
pub use error::AnalyticsError;
pub use render::render_html;
