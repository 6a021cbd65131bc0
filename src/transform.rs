//! Transform helper for coordinate projection

use crate::data_types::PixelBounds;
use crate::scales::ChartScale;

/// Forward/inverse mapping between data space and screen space for one plot
/// area. Handed to the marker clustering predicate so adjacency can be judged
/// in pixels, and used by the tick planners to test visibility.
#[derive(Clone, Debug)]
pub struct PlotTransform {
    pub x_scale: ChartScale,
    pub y_scale: ChartScale,
    pub bounds: PixelBounds,
}

impl PlotTransform {
    pub fn new(x_scale: ChartScale, y_scale: ChartScale, bounds: PixelBounds) -> Self {
        Self {
            x_scale,
            y_scale,
            bounds,
        }
    }

    pub fn data_to_screen(&self, x: f64, y: f64) -> (f32, f32) {
        (
            self.bounds.origin_x + self.x_scale.map(x),
            self.bounds.origin_y + self.y_scale.map(y),
        )
    }

    pub fn screen_to_data(&self, px: f32, py: f32) -> (f64, f64) {
        (
            self.x_scale.invert(px - self.bounds.origin_x),
            self.y_scale.invert(py - self.bounds.origin_y),
        )
    }

    pub fn x_data_to_screen(&self, x: f64) -> f32 {
        self.bounds.origin_x + self.x_scale.map(x)
    }

    pub fn y_data_to_screen(&self, y: f64) -> f32 {
        self.bounds.origin_y + self.y_scale.map(y)
    }

    /// True when the data point projects inside the plot bounds.
    pub fn is_visible(&self, x: f64, y: f64) -> bool {
        let (px, py) = self.data_to_screen(x, y);
        self.bounds.contains(px, py)
    }

    /// Returns (x_m, x_c, y_m, y_c) such that pixel = data * m + c.
    /// Only exact when both scales are linear.
    pub fn scale_coefficients(&self) -> (f32, f32, f32, f32) {
        let (x_m, x_c) = self.x_scale.linear_coeffs();
        let (y_m, y_c) = self.y_scale.linear_coeffs();
        (
            x_m,
            self.bounds.origin_x + x_c,
            y_m,
            self.bounds.origin_y + y_c,
        )
    }
}
