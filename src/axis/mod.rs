//! Axis tick planning: value, logarithmic and calendar-time variants.

use crate::data_types::PixelBounds;
use crate::text::TextMeasurer;
use eyre::Result;
use serde::{Deserialize, Serialize};

pub mod log;
pub mod time;
pub mod value;

/// Pixels between the tick labels and the plot edge.
const TICK_PADDING: f32 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    Value,
    Log,
    Time,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Per-axis planning configuration. Deserializable so dashboards can ship
/// axis setups as JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AxisOptions {
    pub kind: AxisKind,
    pub edge: AxisEdge,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default)]
    pub title: Option<String>,
    /// Display timezone for the time variant; UTC when absent.
    #[serde(default)]
    pub timezone: Option<chrono_tz::Tz>,
}

fn default_font_size() -> f32 {
    12.0
}

impl AxisOptions {
    pub fn new(kind: AxisKind, edge: AxisEdge) -> Self {
        Self {
            kind,
            edge,
            font_size: default_font_size(),
            title: None,
            timezone: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A labeled mark at one domain value.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// Output of one planning pass. Recomputed whenever the domain or the pixel
/// box changes; never cached across domain updates.
#[derive(Clone, Debug, PartialEq)]
pub struct TickPlan {
    /// Strictly increasing, all within the (possibly remapped) domain.
    pub ticks: Vec<Tick>,
    /// Human unit suffix for the axis title, e.g. `"(hour:min)"` or `"×1e3"`.
    pub axis_suffix: Option<String>,
    /// Power-of-1000 multiplier already divided out of the value labels.
    pub display_factor: f64,
    /// Pixel thickness the axis needs for its labels and title.
    pub required_thickness: f32,
}

/// Pixels kept between neighboring labels when thinning.
const LABEL_SPACING: f32 = 4.0;

/// Plans ticks for `domain` inside `bounds`. The pixel box drives label
/// thinning and sizing; the caller re-invokes the planner whenever either
/// input changes (see [`crate::layout::solve_layout`] for the sizing
/// feedback loop).
pub fn plan_ticks(
    domain: (f64, f64),
    bounds: PixelBounds,
    options: &AxisOptions,
    measurer: &dyn TextMeasurer,
) -> TickPlan {
    let mut plan = match options.kind {
        AxisKind::Value => value::plan(domain),
        AxisKind::Log => log::plan(domain),
        AxisKind::Time => time::plan(domain, options.timezone.unwrap_or(chrono_tz::UTC)),
    };
    thin_to_fit(&mut plan, bounds, options, measurer);
    plan.required_thickness = measure_thickness(&plan, options, measurer);
    plan
}

/// Drops ticks until the remaining labels fit the along-axis extent without
/// overlapping, keeping every k-th tick from the first.
fn thin_to_fit(
    plan: &mut TickPlan,
    bounds: PixelBounds,
    options: &AxisOptions,
    measurer: &dyn TextMeasurer,
) {
    if plan.ticks.len() <= 1 {
        return;
    }
    let extent = match options.edge {
        AxisEdge::Left | AxisEdge::Right => bounds.height,
        AxisEdge::Top | AxisEdge::Bottom => bounds.width,
    };
    let footprint = plan
        .ticks
        .iter()
        .map(|t| match options.edge {
            AxisEdge::Left | AxisEdge::Right => {
                measurer.measure_height(&t.label, options.font_size)
            }
            AxisEdge::Top | AxisEdge::Bottom => {
                measurer.measure_width(&t.label, options.font_size)
            }
        })
        .fold(0.0f32, f32::max)
        + LABEL_SPACING;

    let max_fit = (extent / footprint).floor() as usize;
    if max_fit == 0 {
        plan.ticks.truncate(1);
        return;
    }
    if plan.ticks.len() > max_fit {
        let stride = plan.ticks.len().div_ceil(max_fit);
        let mut keep = 0usize;
        plan.ticks.retain(|_| {
            let kept = keep % stride == 0;
            keep += 1;
            kept
        });
    }
}

fn measure_thickness(plan: &TickPlan, options: &AxisOptions, measurer: &dyn TextMeasurer) -> f32 {
    let label_extent = plan
        .ticks
        .iter()
        .map(|t| match options.edge {
            AxisEdge::Left | AxisEdge::Right => {
                measurer.measure_width(&t.label, options.font_size)
            }
            AxisEdge::Top | AxisEdge::Bottom => {
                measurer.measure_height(&t.label, options.font_size)
            }
        })
        .fold(0.0f32, f32::max);

    // Titles (and the unit suffix) take one extra line along the axis.
    let title_extent = match (&options.title, &plan.axis_suffix) {
        (None, None) => 0.0,
        (title, suffix) => {
            let text = match (title, suffix) {
                (Some(t), Some(s)) => format!("{t} {s}"),
                (Some(t), None) => t.clone(),
                (None, Some(s)) => s.clone(),
                (None, None) => unreachable!(),
            };
            measurer.measure_height(&text, options.font_size)
        }
    };

    label_extent + title_extent + TICK_PADDING
}
