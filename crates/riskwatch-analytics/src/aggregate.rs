//! Location grouping and the structured risk report.
//!
//! All money sums use checked [`Decimal`] arithmetic. Means are computed
//! with checked division and normalized, so a mean of `375000.00` reads
//! as `375000`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use riskwatch_types::{LocationStats, LocationSummary, RiskEvent, RiskMetrics, RiskReport};

use crate::error::AnalyticsError;

/// Sum of `property_value` across all events. Zero for an empty slice.
pub fn total_property_value(events: &[RiskEvent]) -> Result<Decimal, AnalyticsError> {
    events.iter().try_fold(Decimal::ZERO, |acc, event| {
        acc.checked_add(event.property_value)
            .ok_or(AnalyticsError::Overflow {
                context: "total property value",
            })
    })
}

/// Partition events by `insured_location` and summarize each group.
///
/// Each group carries its event count, the sum and mean of property
/// values, and how often each event type occurs within it. An empty input
/// yields an empty map; a group is never empty, so the per-group mean is
/// always defined.
pub fn group_by_location(
    events: &[RiskEvent],
) -> Result<BTreeMap<String, LocationStats>, AnalyticsError> {
    let mut accumulators: BTreeMap<&str, GroupAccumulator> = BTreeMap::new();

    for event in events {
        accumulators
            .entry(event.insured_location.as_str())
            .or_default()
            .add(event)?;
    }

    let mut grouped = BTreeMap::new();
    for (location, acc) in accumulators {
        let mean_value = mean(acc.total_value, acc.count)?;
        grouped.insert(
            location.to_owned(),
            LocationStats {
                count: acc.count,
                total_value: acc.total_value,
                mean_value,
                event_type_counts: acc
                    .event_type_counts
                    .into_iter()
                    .map(|(event_type, n)| (event_type.to_owned(), n))
                    .collect(),
            },
        );
    }

    Ok(grouped)
}

/// Build the portfolio-wide [`RiskReport`].
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyInput`] when `events` is empty rather
/// than reporting a NaN average.
pub fn generate_report(events: &[RiskEvent]) -> Result<RiskReport, AnalyticsError> {
    if events.is_empty() {
        return Err(AnalyticsError::EmptyInput);
    }

    let total_policies = events.len();
    let total_value = total_property_value(events)?;
    let average_property_value = mean(total_value, total_policies)?;

    let grouped = group_by_location(events)?;
    let highest_value_location = highest_value_location(events, &grouped)?;
    let most_common_event = most_common_event(events)?;

    let total_claims = events.iter().try_fold(0usize, |acc, event| {
        acc.checked_add(event.claim_count())
            .ok_or(AnalyticsError::Overflow {
                context: "total claim count",
            })
    })?;
    let average_claims_per_policy = mean(Decimal::from(total_claims), total_policies)?;

    let locations = grouped
        .iter()
        .map(|(location, stats)| (location.clone(), LocationSummary::from(stats)))
        .collect();

    Ok(RiskReport {
        total_policies,
        total_property_value: total_value,
        average_property_value,
        locations,
        risk_metrics: RiskMetrics {
            highest_value_location,
            most_common_event,
            average_claims_per_policy,
        },
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Running totals for one location group.
#[derive(Default)]
struct GroupAccumulator<'a> {
    count: usize,
    total_value: Decimal,
    event_type_counts: BTreeMap<&'a str, usize>,
}

impl<'a> GroupAccumulator<'a> {
    fn add(&mut self, event: &'a RiskEvent) -> Result<(), AnalyticsError> {
        self.count = self.count.checked_add(1).ok_or(AnalyticsError::Overflow {
            context: "location event count",
        })?;
        self.total_value = self
            .total_value
            .checked_add(event.property_value)
            .ok_or(AnalyticsError::Overflow {
                context: "location total value",
            })?;
        let n = self
            .event_type_counts
            .entry(event.event_type.as_str())
            .or_insert(0);
        *n = n.checked_add(1).ok_or(AnalyticsError::Overflow {
            context: "event type count",
        })?;
        Ok(())
    }
}

/// Arithmetic mean of `total` over `count` items.
pub(crate) fn mean(total: Decimal, count: usize) -> Result<Decimal, AnalyticsError> {
    if count == 0 {
        return Err(AnalyticsError::EmptyInput);
    }
    total
        .checked_div(Decimal::from(count))
        .map(|m| m.normalize())
        .ok_or(AnalyticsError::Overflow { context: "mean" })
}

/// Location with the largest total value, first-seen wins on ties.
fn highest_value_location(
    events: &[RiskEvent],
    grouped: &BTreeMap<String, LocationStats>,
) -> Result<String, AnalyticsError> {
    let mut best: Option<(&str, Decimal)> = None;

    for event in events {
        let location = event.insured_location.as_str();
        let Some(stats) = grouped.get(location) else {
            continue;
        };
        match best {
            Some((_, best_total)) if stats.total_value <= best_total => {}
            _ => best = Some((location, stats.total_value)),
        }
    }

    best.map(|(location, _)| location.to_owned())
        .ok_or(AnalyticsError::EmptyInput)
}

/// Most frequent event type, lexicographically smallest wins on ties.
fn most_common_event(events: &[RiskEvent]) -> Result<String, AnalyticsError> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for event in events {
        let n = counts.entry(event.event_type.as_str()).or_insert(0);
        *n = n.checked_add(1).ok_or(AnalyticsError::Overflow {
            context: "event type count",
        })?;
    }

    // BTreeMap iterates in ascending key order; strict comparison keeps the
    // first (smallest) key among equal counts.
    let mut best: Option<(&str, usize)> = None;
    for (event_type, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((event_type, count)),
        }
    }

    best.map(|(event_type, _)| event_type.to_owned())
        .ok_or(AnalyticsError::EmptyInput)
}
