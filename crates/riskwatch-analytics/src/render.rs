//! Render a [`ChartGrid`] as a standalone HTML page.
//!
//! Geometry (bar rectangles, tick positions, legend swatches) is computed
//! here; the `charts.html` template only lays the panels out in a 2x2 grid
//! and emits the SVG elements. The template is auto-escaped, so location
//! and event-type labels are safe to embed.

use minijinja::{Environment, context};
use serde::Serialize;

use crate::charts::{BarChart, ChartGrid, Histogram, StackedBarChart};
use crate::error::AnalyticsError;

const TEMPLATE_NAME: &str = "charts.html";
const TEMPLATE: &str = include_str!("../templates/charts.html");

/// Panel size in SVG user units.
const PANEL_WIDTH: f64 = 480.0;
const PANEL_HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 70.0;

/// Fill colours cycled through for bars and stack layers.
const PALETTE: &[&str] = &[
    "#4c72b0", "#dd8452", "#55a868", "#c44e52", "#8172b3", "#937860", "#da8bc3", "#8c8c8c",
];

/// A filled rectangle in panel coordinates.
#[derive(Debug, Serialize)]
struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    fill: &'static str,
    tooltip: String,
}

/// An x-axis label.
#[derive(Debug, Serialize)]
struct Tick {
    x: f64,
    label: String,
}

/// A legend entry.
#[derive(Debug, Serialize)]
struct LegendEntry {
    fill: &'static str,
    label: String,
}

/// One drawable panel.
#[derive(Debug, Serialize)]
struct Panel {
    title: String,
    x_label: String,
    y_label: &'static str,
    y_max: String,
    rotate_ticks: bool,
    rects: Vec<Rect>,
    ticks: Vec<Tick>,
    legend: Vec<LegendEntry>,
}

/// Render all four panels into a complete HTML document.
///
/// # Errors
///
/// Returns [`AnalyticsError::Render`] if the template fails to render.
pub fn render_html(grid: &ChartGrid, page_title: &str) -> Result<String, AnalyticsError> {
    let panels = vec![
        histogram_panel(&grid.property_values),
        stacked_panel(&grid.event_types_by_location),
        bar_panel(&grid.average_value_by_location),
        histogram_panel(&grid.claims_per_policy),
    ];

    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;
    let template = env.get_template(TEMPLATE_NAME)?;

    let html = template.render(context! {
        page_title => page_title,
        panel_width => PANEL_WIDTH,
        panel_height => PANEL_HEIGHT,
        plot_left => MARGIN_LEFT,
        plot_top => MARGIN_TOP,
        plot_bottom => PANEL_HEIGHT - MARGIN_BOTTOM,
        plot_right => PANEL_WIDTH - MARGIN_RIGHT,
        panels => panels,
    })?;

    tracing::debug!(bytes = html.len(), "Rendered chart page");
    Ok(html)
}

// ---------------------------------------------------------------------------
// Panel builders
// ---------------------------------------------------------------------------

const fn plot_width() -> f64 {
    PANEL_WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

const fn plot_height() -> f64 {
    PANEL_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

fn colour(i: usize) -> &'static str {
    PALETTE
        .get(i.checked_rem(PALETTE.len()).unwrap_or(0))
        .copied()
        .unwrap_or("#4c72b0")
}

/// Scale a value to a bar height, guarding against an all-zero axis.
fn bar_height(value: f64, y_max: f64) -> f64 {
    if y_max > 0.0 {
        value / y_max * plot_height()
    } else {
        0.0
    }
}

fn usize_to_f64(n: usize) -> f64 {
    u32::try_from(n).map(f64::from).unwrap_or(f64::from(u32::MAX))
}

fn histogram_panel(histogram: &Histogram) -> Panel {
    let n = usize_to_f64(histogram.bins.len().max(1));
    let slot = plot_width() / n;
    let y_max = histogram
        .bins
        .iter()
        .map(|b| usize_to_f64(b.count))
        .fold(0.0, f64::max);

    let mut rects = Vec::with_capacity(histogram.bins.len());
    let mut ticks = Vec::with_capacity(histogram.bins.len());
    for (i, bin) in histogram.bins.iter().enumerate() {
        let x = MARGIN_LEFT + slot * usize_to_f64(i);
        let height = bar_height(usize_to_f64(bin.count), y_max);
        rects.push(Rect {
            x,
            y: MARGIN_TOP + plot_height() - height,
            width: slot,
            height,
            fill: colour(0),
            tooltip: format!(
                "{} to {}: {}",
                compact(bin.lower),
                compact(bin.upper),
                bin.count
            ),
        });
        ticks.push(Tick {
            x,
            label: compact(bin.lower),
        });
    }

    Panel {
        title: histogram.title.clone(),
        x_label: histogram.x_label.clone(),
        y_label: "Count",
        y_max: compact(y_max),
        rotate_ticks: false,
        rects,
        ticks,
        legend: Vec::new(),
    }
}

fn stacked_panel(chart: &StackedBarChart) -> Panel {
    let n = usize_to_f64(chart.categories.len().max(1));
    let slot = plot_width() / n;
    let bar_width = slot * 0.6;

    let totals: Vec<f64> = (0..chart.categories.len())
        .map(|c| {
            chart
                .series
                .iter()
                .filter_map(|s| s.values.get(c))
                .sum::<f64>()
        })
        .collect();
    let y_max = totals.iter().copied().fold(0.0, f64::max);

    let mut rects = Vec::new();
    let mut ticks = Vec::with_capacity(chart.categories.len());
    for (c, category) in chart.categories.iter().enumerate() {
        let x = MARGIN_LEFT + slot * usize_to_f64(c) + (slot - bar_width) / 2.0;
        let mut stacked = 0.0;
        for (s, series) in chart.series.iter().enumerate() {
            let value = series.values.get(c).copied().unwrap_or(0.0);
            if value <= 0.0 {
                continue;
            }
            let height = bar_height(value, y_max);
            stacked += height;
            rects.push(Rect {
                x,
                y: MARGIN_TOP + plot_height() - stacked,
                width: bar_width,
                height,
                fill: colour(s),
                tooltip: format!("{category} / {}: {}", series.name, compact(value)),
            });
        }
        ticks.push(Tick {
            x: x + bar_width / 2.0,
            label: category.clone(),
        });
    }

    let legend = chart
        .series
        .iter()
        .enumerate()
        .map(|(s, series)| LegendEntry {
            fill: colour(s),
            label: series.name.clone(),
        })
        .collect();

    Panel {
        title: chart.title.clone(),
        x_label: String::from("insured_location"),
        y_label: "Count",
        y_max: compact(y_max),
        rotate_ticks: true,
        rects,
        ticks,
        legend,
    }
}

fn bar_panel(chart: &BarChart) -> Panel {
    let n = usize_to_f64(chart.categories.len().max(1));
    let slot = plot_width() / n;
    let bar_width = slot * 0.6;
    let y_max = chart.values.iter().copied().fold(0.0, f64::max);

    let mut rects = Vec::with_capacity(chart.values.len());
    let mut ticks = Vec::with_capacity(chart.categories.len());
    for (c, (category, value)) in chart.categories.iter().zip(&chart.values).enumerate() {
        let x = MARGIN_LEFT + slot * usize_to_f64(c) + (slot - bar_width) / 2.0;
        let height = bar_height(*value, y_max);
        rects.push(Rect {
            x,
            y: MARGIN_TOP + plot_height() - height,
            width: bar_width,
            height,
            fill: colour(0),
            tooltip: format!("{category}: {}", compact(*value)),
        });
        ticks.push(Tick {
            x: x + bar_width / 2.0,
            label: category.clone(),
        });
    }

    Panel {
        title: chart.title.clone(),
        x_label: String::from("insured_location"),
        y_label: "property_value",
        y_max: compact(y_max),
        rotate_ticks: true,
        rects,
        ticks,
        legend: Vec::new(),
    }
}

/// Short axis label: `1.5M`, `250k`, `12`.
fn compact(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{}M", trim(value / 1_000_000.0))
    } else if magnitude >= 1_000.0 {
        format!("{}k", trim(value / 1_000.0))
    } else {
        trim(value)
    }
}

/// Format with at most one decimal, dropping a trailing `.0`.
fn trim(value: f64) -> String {
    let text = format!("{value:.1}");
    text.strip_suffix(".0").map_or_else(|| text.clone(), ToOwned::to_owned)
}
