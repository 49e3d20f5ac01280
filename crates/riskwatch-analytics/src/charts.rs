//! Chart-ready series for the four reporting views.
//!
//! A [`ChartGrid`] holds one panel per view, already binned and grouped:
//!
//! 1. histogram of property values
//! 2. event-type counts per location, stacked
//! 3. mean property value per location
//! 4. histogram of claim counts per policy
//!
//! Categories are sorted. Values are `f64` because they are only used for
//! drawing; the exact figures live in the [`aggregate`](crate::aggregate)
//! output.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use riskwatch_types::RiskEvent;

use crate::aggregate::group_by_location;
use crate::error::AnalyticsError;

/// One bar of a histogram covering `[lower, upper)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Exclusive upper edge (inclusive for the last bin).
    pub upper: f64,
    /// Number of observations in the bin.
    pub count: usize,
}

/// A binned distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Panel title.
    pub title: String,
    /// Label of the binned quantity.
    pub x_label: String,
    /// Bins in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// One named series of a multi-series chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Legend label.
    pub name: String,
    /// One value per category, aligned with the chart's categories.
    pub values: Vec<f64>,
}

/// Bars stacked per category, one layer per series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedBarChart {
    /// Panel title.
    pub title: String,
    /// Category labels along the x axis.
    pub categories: Vec<String>,
    /// Stack layers, bottom first.
    pub series: Vec<Series>,
}

/// A single value per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    /// Panel title.
    pub title: String,
    /// Category labels along the x axis.
    pub categories: Vec<String>,
    /// One value per category.
    pub values: Vec<f64>,
}

/// The four reporting views, laid out as a 2x2 grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGrid {
    /// Top left: property value distribution.
    pub property_values: Histogram,
    /// Top right: event types by location.
    pub event_types_by_location: StackedBarChart,
    /// Bottom left: average property value by location.
    pub average_value_by_location: BarChart,
    /// Bottom right: number of claims per policy.
    pub claims_per_policy: Histogram,
}

impl ChartGrid {
    /// Build all four panels from a collection of risk events.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::EmptyInput`] when `events` is empty.
    pub fn from_events(events: &[RiskEvent]) -> Result<Self, AnalyticsError> {
        if events.is_empty() {
            return Err(AnalyticsError::EmptyInput);
        }

        Ok(Self {
            property_values: property_value_histogram(events)?,
            event_types_by_location: event_types_by_location(events)?,
            average_value_by_location: average_value_by_location(events)?,
            claims_per_policy: claims_histogram(events)?,
        })
    }
}

/// Equal-width histogram of property values.
///
/// Uses Sturges' rule for the bin count (`ceil(log2(n)) + 1`). When every
/// value is identical a single zero-width bin holds them all.
pub fn property_value_histogram(events: &[RiskEvent]) -> Result<Histogram, AnalyticsError> {
    let title = String::from("Property Value Distribution");
    let x_label = String::from("property_value");

    let values: Vec<Decimal> = events.iter().map(|e| e.property_value).collect();
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Err(AnalyticsError::EmptyInput);
    };

    if min == max {
        return Ok(Histogram {
            title,
            x_label,
            bins: vec![HistogramBin {
                lower: to_f64(min),
                upper: to_f64(max),
                count: values.len(),
            }],
        });
    }

    let bin_count = sturges_bins(values.len());
    let span = max.checked_sub(min).ok_or_else(overflow)?;
    let width = span
        .checked_div(Decimal::from(bin_count))
        .ok_or_else(overflow)?;

    // Edges min, min + width, ..., max. Values are placed by comparing
    // against these same edges, so counts always agree with the bounds.
    let mut edges = Vec::with_capacity(bin_count.saturating_add(1));
    let mut edge = min;
    for _ in 1..bin_count {
        edges.push(edge);
        edge = edge.checked_add(width).ok_or_else(overflow)?;
    }
    edges.push(edge);
    edges.push(max);

    let mut counts = vec![0usize; bin_count];
    for value in &values {
        // Number of interior edges at or below the value; max lands in the
        // last bin because the final edge is excluded.
        let index = edges
            .iter()
            .skip(1)
            .take(bin_count.saturating_sub(1))
            .take_while(|&&e| *value >= e)
            .count();
        if let Some(slot) = counts.get_mut(index) {
            *slot = slot.checked_add(1).ok_or_else(overflow)?;
        }
    }

    let bins = edges
        .windows(2)
        .zip(counts)
        .filter_map(|(pair, count)| match pair {
            [lower, upper] => Some(HistogramBin {
                lower: to_f64(*lower),
                upper: to_f64(*upper),
                count,
            }),
            _ => None,
        })
        .collect();

    Ok(Histogram {
        title,
        x_label,
        bins,
    })
}

/// Event-type counts per location, one stack layer per event type.
pub fn event_types_by_location(events: &[RiskEvent]) -> Result<StackedBarChart, AnalyticsError> {
    let grouped = group_by_location(events)?;
    let event_types: BTreeSet<&str> = events.iter().map(|e| e.event_type.as_str()).collect();

    let categories: Vec<String> = grouped.keys().cloned().collect();
    let mut series = Vec::with_capacity(event_types.len());
    for event_type in event_types {
        let values = grouped
            .values()
            .map(|stats| {
                count_to_f64(stats.event_type_counts.get(event_type).copied().unwrap_or(0))
            })
            .collect::<Result<Vec<_>, _>>()?;
        series.push(Series {
            name: event_type.to_owned(),
            values,
        });
    }

    Ok(StackedBarChart {
        title: String::from("Event Types by Location"),
        categories,
        series,
    })
}

/// Mean property value per location.
pub fn average_value_by_location(events: &[RiskEvent]) -> Result<BarChart, AnalyticsError> {
    let grouped = group_by_location(events)?;
    Ok(BarChart {
        title: String::from("Average Property Value by Location"),
        categories: grouped.keys().cloned().collect(),
        values: grouped.values().map(|stats| to_f64(stats.mean_value)).collect(),
    })
}

/// One bin per integer claim count from zero to the maximum observed.
pub fn claims_histogram(events: &[RiskEvent]) -> Result<Histogram, AnalyticsError> {
    let max_claims = events
        .iter()
        .map(RiskEvent::claim_count)
        .max()
        .ok_or(AnalyticsError::EmptyInput)?;

    let mut counts = vec![0usize; max_claims.saturating_add(1)];
    for event in events {
        if let Some(slot) = counts.get_mut(event.claim_count()) {
            *slot = slot.checked_add(1).ok_or_else(overflow)?;
        }
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(claims, count)| {
            let lower = count_to_f64(claims)?;
            Ok::<_, AnalyticsError>(HistogramBin {
                lower,
                upper: lower + 1.0,
                count,
            })
        })
        .collect::<Result<Vec<_>, AnalyticsError>>()?;

    Ok(Histogram {
        title: String::from("Number of Claims per Policy"),
        x_label: String::from("claim_history"),
        bins,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `ceil(log2(n)) + 1`, at least one bin.
const fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    let ceil_log2 = usize::BITS.saturating_sub(n.saturating_sub(1).leading_zeros());
    (ceil_log2 as usize).saturating_add(1)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::MAX)
}

fn count_to_f64(count: usize) -> Result<f64, AnalyticsError> {
    u32::try_from(count)
        .ok()
        .map(f64::from)
        .ok_or_else(overflow)
}

const fn overflow() -> AnalyticsError {
    AnalyticsError::Overflow {
        context: "chart series",
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use riskwatch_store::seed_events;

    use super::*;
    use crate::aggregate::generate_report;

    fn event(id: &str, value: Decimal, location: &str, event_type: &str, claims: usize) -> RiskEvent {
        RiskEvent::new(
            id,
            value,
            location,
            event_type,
            (0..claims).map(|i| format!("claim-{i}")).collect(),
        )
    }

    #[test]
    fn sturges_bin_counts() {
        assert_eq!(sturges_bins(1), 1);
        assert_eq!(sturges_bins(2), 2);
        assert_eq!(sturges_bins(3), 3);
        assert_eq!(sturges_bins(8), 4);
        assert_eq!(sturges_bins(9), 5);
    }

    #[test]
    fn empty_input_has_no_charts() {
        assert!(matches!(
            ChartGrid::from_events(&[]),
            Err(AnalyticsError::EmptyInput)
        ));
    }

    #[test]
    fn seed_grid_panels() {
        let result = ChartGrid::from_events(&seed_events());
        assert!(result.is_ok());

        if let Ok(grid) = result {
            let bins = &grid.property_values.bins;
            assert_eq!(bins.len(), 2);
            assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
            assert_eq!(bins.first().map(|b| b.lower), Some(250_000.0));
            assert_eq!(bins.last().map(|b| b.upper), Some(500_000.0));

            assert_eq!(
                grid.event_types_by_location.categories,
                vec!["California", "Florida"]
            );
            let names: Vec<&str> = grid
                .event_types_by_location
                .series
                .iter()
                .map(|s| s.name.as_str())
                .collect();
            assert_eq!(names, vec!["Earthquake", "Hurricane"]);
            assert_eq!(
                grid.event_types_by_location
                    .series
                    .first()
                    .map(|s| s.values.clone()),
                Some(vec![1.0, 0.0])
            );

            assert_eq!(
                grid.average_value_by_location.values,
                vec![250_000.0, 500_000.0]
            );

            let claims: Vec<usize> = grid.claims_per_policy.bins.iter().map(|b| b.count).collect();
            assert_eq!(claims, vec![1, 0, 1]);
        }
    }

    #[test]
    fn identical_values_share_one_bin() {
        let ten = Decimal::TEN;
        let events = vec![
            event("A", ten, "X", "Hail", 0),
            event("B", ten, "Y", "Hail", 0),
            event("C", ten, "Z", "Hail", 0),
        ];
        let result = property_value_histogram(&events);
        assert!(result.is_ok());

        if let Ok(histogram) = result {
            assert_eq!(histogram.bins.len(), 1);
            assert_eq!(histogram.bins.first().map(|b| b.count), Some(3));
        }
    }

    #[test]
    fn histogram_places_every_value() {
        let events: Vec<RiskEvent> = (0..20)
            .map(|i| event(&format!("P{i}"), Decimal::new(i, 0), "X", "Hail", 0))
            .collect();
        let result = property_value_histogram(&events);
        assert!(result.is_ok());

        if let Ok(histogram) = result {
            assert_eq!(histogram.bins.len(), 6);
            assert_eq!(histogram.bins.iter().map(|b| b.count).sum::<usize>(), 20);
            assert_eq!(histogram.bins.last().map(|b| b.upper), Some(19.0));
        }
    }

    #[test]
    fn values_on_an_edge_open_the_next_bin() {
        // Three values give three bins of width 1 over [0, 3].
        let events = vec![
            event("A", Decimal::ZERO, "X", "Hail", 0),
            event("B", Decimal::ONE, "X", "Hail", 0),
            event("C", Decimal::new(3, 0), "X", "Hail", 0),
        ];
        let result = property_value_histogram(&events);
        assert!(result.is_ok());

        if let Ok(histogram) = result {
            let counts: Vec<usize> = histogram.bins.iter().map(|b| b.count).collect();
            assert_eq!(counts, vec![1, 1, 1]);
        }
    }

    #[test]
    fn huge_property_values_still_chart() {
        // Anything the report can total, the charts can bin.
        let half_max = Decimal::MAX.checked_div(Decimal::TWO).unwrap_or_default();
        let events = vec![
            event("A", Decimal::ZERO, "X", "Hail", 0),
            event("B", half_max, "Y", "Flood", 1),
        ];
        assert!(generate_report(&events).is_ok());

        let result = ChartGrid::from_events(&events);
        assert!(result.is_ok(), "{result:?}");

        if let Ok(grid) = result {
            let bins = &grid.property_values.bins;
            assert_eq!(bins.len(), 2);
            assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1]);
        }
    }
}
