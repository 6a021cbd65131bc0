//! Headless charting core: hierarchical point indexing, axis tick planning
//! and marker clustering, consumed by an external rendering layer.

pub mod aggregation;
pub mod axis;
pub mod data_types;
pub mod layout;
pub mod point_index;
pub mod scales;
pub mod text;
pub mod transform;

pub use aggregation::{aggregate_markers, merge_markers, overlap_within};
pub use axis::{plan_ticks, AxisEdge, AxisKind, AxisOptions, Tick, TickPlan};
pub use data_types::{AxisRange, Color, Marker, PixelBounds, PlotPoint};
pub use layout::{solve_layout, AxisSlot, Gutters, Layout};
pub use point_index::PointIndex;
pub use scales::{ChartScale, ScaleKind};
pub use text::{MonospaceMeasurer, TextMeasurer};
pub use transform::PlotTransform;
