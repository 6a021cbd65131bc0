//! Plot-area layout: axis gutters and the sizing feedback loop.
//!
//! Axis thickness depends on label text, label text depends on the planned
//! ticks, and the plot area available to the ticks depends on axis
//! thickness. The loop is re-run until the gutters settle, with a small
//! iteration cap since convergence is expected but not guaranteed.

use crate::axis::{plan_ticks, AxisEdge, AxisOptions, TickPlan};
use crate::data_types::PixelBounds;
use crate::text::TextMeasurer;

const MAX_LAYOUT_PASSES: usize = 4;
/// Gutter changes below this many pixels count as settled.
const SETTLE_EPSILON: f32 = 0.5;

/// Pixel thickness reserved on each edge of the plot area for axis labels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Gutters {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Gutters {
    fn settled(&self, other: &Gutters) -> bool {
        (self.left - other.left).abs() < SETTLE_EPSILON
            && (self.right - other.right).abs() < SETTLE_EPSILON
            && (self.top - other.top).abs() < SETTLE_EPSILON
            && (self.bottom - other.bottom).abs() < SETTLE_EPSILON
    }
}

/// One axis participating in the layout: its options and visible domain.
#[derive(Clone, Debug)]
pub struct AxisSlot {
    pub options: AxisOptions,
    pub domain: (f64, f64),
}

/// Result of a layout pass: the inner plot area, the gutters carved out of
/// the outer bounds, and one tick plan per input axis (same order).
#[derive(Clone, Debug)]
pub struct Layout {
    pub plot_area: PixelBounds,
    pub gutters: Gutters,
    pub plans: Vec<TickPlan>,
}

/// Plans all axes inside `outer`, iterating the plan → measure → shrink loop
/// until the gutters stop changing or the pass cap is reached.
pub fn solve_layout(
    outer: PixelBounds,
    axes: &[AxisSlot],
    measurer: &dyn TextMeasurer,
) -> Layout {
    let mut gutters = Gutters::default();
    let mut plans: Vec<TickPlan> = Vec::new();

    for pass in 0..MAX_LAYOUT_PASSES {
        let plot_area = carve(outer, &gutters);
        plans = axes
            .iter()
            .map(|slot| plan_ticks(slot.domain, plot_area, &slot.options, measurer))
            .collect();

        let mut next = Gutters::default();
        for (slot, plan) in axes.iter().zip(&plans) {
            match slot.options.edge {
                AxisEdge::Left => next.left += plan.required_thickness,
                AxisEdge::Right => next.right += plan.required_thickness,
                AxisEdge::Top => next.top += plan.required_thickness,
                AxisEdge::Bottom => next.bottom += plan.required_thickness,
            }
        }

        if next.settled(&gutters) {
            tracing::debug!(pass, "axis layout settled");
            break;
        }
        gutters = next;
    }

    Layout {
        plot_area: carve(outer, &gutters),
        gutters,
        plans,
    }
}

fn carve(outer: PixelBounds, gutters: &Gutters) -> PixelBounds {
    PixelBounds::new(
        outer.origin_x + gutters.left,
        outer.origin_y + gutters.top,
        (outer.width - gutters.left - gutters.right).max(0.0),
        (outer.height - gutters.top - gutters.bottom).max(0.0),
    )
}
