//! Hierarchical min/max index over an ordered time series.
//!
//! Built once from an X-ascending point slice, immutable afterwards. Range
//! queries prune whole subtrees through cached per-node extents, so limits
//! and extraction stay sub-linear on large series while the UI redraws on
//! every zoom or pan tick.

use crate::data_types::PlotPoint;
use eyre::Result;
use rayon::prelude::*;

/// Maximum number of points stored directly in a leaf.
pub const FAN_OUT: usize = 20;

#[derive(Debug)]
enum NodeContent {
    Points(Vec<PlotPoint>),
    Children(Vec<PointIndex>),
}

/// One node of the index. The root is built with [`PointIndex::build`];
/// internal nodes partition their parent's X-range contiguously and in order.
#[derive(Debug)]
pub struct PointIndex {
    min_x: f64,
    max_x: f64,
    /// Y extent over all descendant points, NaN samples excluded. `None` when
    /// every covered sample has a NaN value.
    y_range: Option<(f64, f64)>,
    content: NodeContent,
}

fn merge_ranges(a: Option<(f64, f64)>, b: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (a, b) {
        (Some((a_min, a_max)), Some((b_min, b_max))) => {
            Some((a_min.min(b_min), a_max.max(b_max)))
        }
        (Some(r), None) | (None, Some(r)) => Some(r),
        (None, None) => None,
    }
}

fn leaf_y_range(points: &[PlotPoint]) -> Option<(f64, f64)> {
    points
        .iter()
        .filter(|p| !p.y.is_nan())
        .fold(None, |acc, p| merge_ranges(acc, Some((p.y, p.y))))
}

impl PointIndex {
    /// Builds the index over `points`. The slice must be ordered by X
    /// ascending; that precondition is not validated. Empty input is
    /// rejected.
    pub fn build(points: &[PlotPoint]) -> Result<Self> {
        if points.is_empty() {
            eyre::bail!("point index requires a non-empty series");
        }
        let root = Self::build_node(points, true);
        tracing::debug!(
            points = points.len(),
            min_x = root.min_x,
            max_x = root.max_x,
            "built point index"
        );
        Ok(root)
    }

    fn build_node(points: &[PlotPoint], parallel: bool) -> Self {
        let n = points.len();
        if n <= FAN_OUT {
            return Self {
                min_x: points[0].x,
                max_x: points[n - 1].x,
                y_range: leaf_y_range(points),
                content: NodeContent::Points(points.to_vec()),
            };
        }

        // Branching grows with N so depth stays bounded: a roughly
        // FAN_OUT-ary tree regardless of series length.
        let block_size = (n as f64).powf(1.0 / FAN_OUT as f64).floor() as usize * FAN_OUT;
        let chunks: Vec<&[PlotPoint]> = points.chunks(block_size).collect();

        let children: Vec<PointIndex> = if parallel {
            chunks
                .into_par_iter()
                .map(|c| Self::build_node(c, false))
                .collect()
        } else {
            chunks
                .into_iter()
                .map(|c| Self::build_node(c, false))
                .collect()
        };

        let y_range = children
            .iter()
            .fold(None, |acc, c| merge_ranges(acc, c.y_range));

        Self {
            min_x: points[0].x,
            max_x: points[n - 1].x,
            y_range,
            content: NodeContent::Children(children),
        }
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    /// Y extent over the whole series, `None` when every sample is NaN.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.y_range
    }

    /// Y extent of the points with X in `(start, end)`. Boundary handling is
    /// approximately inclusive: leaf points are filtered exclusively while
    /// node pruning keeps any subtree overlapping the open interval, so
    /// callers must not rely on exact boundary semantics. Returns `None` when
    /// no point with a non-NaN value falls in the range.
    pub fn limits(&self, start: f64, end: f64) -> Option<(f64, f64)> {
        if start <= self.min_x && end >= self.max_x {
            return self.y_range;
        }
        if !(self.max_x > start && self.min_x < end) {
            return None;
        }
        match &self.content {
            NodeContent::Points(points) => points
                .iter()
                .filter(|p| p.x > start && p.x < end && !p.y.is_nan())
                .fold(None, |acc, p| merge_ranges(acc, Some((p.y, p.y)))),
            NodeContent::Children(children) => children
                .iter()
                .filter(|c| c.max_x > start && c.min_x < end)
                .fold(None, |acc, c| merge_ranges(acc, c.limits(start, end))),
        }
    }

    /// All points with X in `[start, end]`, in X order.
    pub fn data(&self, start: f64, end: f64) -> Vec<PlotPoint> {
        let mut out = Vec::new();
        self.collect_data(start, end, &mut out);
        out
    }

    fn collect_data(&self, start: f64, end: f64, out: &mut Vec<PlotPoint>) {
        if end < self.min_x || start > self.max_x {
            return;
        }
        match &self.content {
            NodeContent::Points(points) => {
                if start <= self.min_x && end >= self.max_x {
                    out.extend_from_slice(points);
                } else {
                    out.extend(points.iter().filter(|p| p.x >= start && p.x <= end));
                }
            }
            NodeContent::Children(children) => {
                for child in children {
                    if child.min_x <= end && child.max_x >= start {
                        child.collect_data(start, end, out);
                    }
                }
            }
        }
    }

    /// The full series in original order.
    pub fn full_data(&self) -> Vec<PlotPoint> {
        self.data(self.min_x, self.max_x)
    }

    /// The point whose X is nearest to `x`. Out-of-range queries clamp to the
    /// first/last point. Equal-distance ties resolve to the lower-X point.
    pub fn nearest(&self, x: f64) -> PlotPoint {
        match &self.content {
            NodeContent::Points(points) => {
                if x <= self.min_x {
                    return points[0];
                }
                if x >= self.max_x {
                    return points[points.len() - 1];
                }
                let mut lower = 0usize;
                let mut upper = points.len() - 1;
                while upper - lower > 1 {
                    let mid = (lower + upper) / 2;
                    if points[mid].x == x {
                        return points[mid];
                    }
                    if points[mid].x < x {
                        lower = mid;
                    } else {
                        upper = mid;
                    }
                }
                if (x - points[lower].x) <= (points[upper].x - x) {
                    points[lower]
                } else {
                    points[upper]
                }
            }
            NodeContent::Children(children) => {
                if x <= self.min_x {
                    return children[0].nearest(x);
                }
                if x >= self.max_x {
                    return children[children.len() - 1].nearest(x);
                }
                let mut idx = children.len() - 1;
                for (i, child) in children.iter().enumerate() {
                    if x <= child.max_x {
                        idx = i;
                        break;
                    }
                }
                if idx == 0 || x >= children[idx].min_x {
                    return children[idx].nearest(x);
                }
                // x falls in the gap between two children's ranges; either
                // neighbor may hold the closest point.
                let before = children[idx - 1].nearest(x);
                let after = children[idx].nearest(x);
                if (x - before.x) <= (after.x - x) {
                    before
                } else {
                    after
                }
            }
        }
    }
}
