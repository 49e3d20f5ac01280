//! Aggregate types produced by the analytics engine.
//!
//! Grouped maps are [`BTreeMap`]s so locations and event types always
//! come out in sorted order, which is the category order charts use.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Per-location statistics returned by location grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LocationStats {
    /// Number of risk events at this location.
    pub count: usize,
    /// Sum of property values at this location.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub total_value: Decimal,
    /// Arithmetic mean of property values at this location.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub mean_value: Decimal,
    /// Occurrences of each event type at this location.
    pub event_type_counts: BTreeMap<String, usize>,
}

/// Per-location entry inside a [`RiskReport`]. Same as [`LocationStats`]
/// without the mean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LocationSummary {
    /// Number of risk events at this location.
    pub count: usize,
    /// Sum of property values at this location.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub total_value: Decimal,
    /// Occurrences of each event type at this location.
    pub event_types: BTreeMap<String, usize>,
}

impl From<&LocationStats> for LocationSummary {
    fn from(stats: &LocationStats) -> Self {
        Self {
            count: stats.count,
            total_value: stats.total_value,
            event_types: stats.event_type_counts.clone(),
        }
    }
}

/// Headline risk indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RiskMetrics {
    /// Location with the greatest summed property value. Ties go to the
    /// location seen first in input order.
    pub highest_value_location: String,
    /// Most frequent event type overall. Ties go to the lexicographically
    /// smallest event type.
    pub most_common_event: String,
    /// Mean number of claims per policy.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub average_claims_per_policy: Decimal,
}

/// Portfolio-wide risk report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RiskReport {
    /// Number of policies covered by the report.
    pub total_policies: usize,
    /// Sum of all property values.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub total_property_value: Decimal,
    /// Mean property value across all policies.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub average_property_value: Decimal,
    /// Per-location breakdown, keyed by insured location.
    pub locations: BTreeMap<String, LocationSummary>,
    /// Headline indicators.
    pub risk_metrics: RiskMetrics,
}
