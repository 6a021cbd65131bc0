//! Text measurement collaborator.
//!
//! Real renderers measure with their font stack; the planners only need the
//! pixel extent of a label, so the surface is a trait plus a deterministic
//! estimator for headless use and tests.

/// Measures rendered label extents in pixels at a given font size.
pub trait TextMeasurer {
    fn measure_width(&self, text: &str, font_size: f32) -> f32;
    fn measure_height(&self, text: &str, font_size: f32) -> f32;
}

/// Fixed-cell estimator: every character occupies the same fraction of the
/// font size. Deterministic, good enough for gutter sizing without a font
/// stack.
#[derive(Clone, Copy, Debug)]
pub struct MonospaceMeasurer {
    /// Glyph advance as a fraction of the font size.
    pub advance: f32,
    /// Line height as a fraction of the font size.
    pub line_height: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * self.advance * font_size
    }

    fn measure_height(&self, text: &str, font_size: f32) -> f32 {
        let lines = text.lines().count().max(1);
        lines as f32 * self.line_height * font_size
    }
}
