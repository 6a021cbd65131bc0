// Data structures for the charting core

use eyre::Result;
use serde::{Deserialize, Serialize};

/// A single sample of a series. Series slices are ordered by `x` ascending;
/// that ordering is a precondition of the point index and the axis planners,
/// not something this type enforces.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl PlotPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Straight-alpha RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(255, 255, 255)
    }
}

// Custom serialization module for Color <-> hex string
pub mod hex_color {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let hex = if color.a == 255 {
            format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                color.r, color.g, color.b, color.a
            )
        };
        serializer.serialize_str(&hex)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex_str(&s).map_err(serde::de::Error::custom)
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse_hex_str(hex: &str) -> Result<Color> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            eyre::bail!("invalid hex color {hex:?}");
        }
        match digits.len() {
            3 => {
                let channel = |i: usize| -> Result<u8> {
                    let v = u8::from_str_radix(&digits[i..i + 1], 16)?;
                    Ok(v * 16 + v)
                };
                Ok(Color::rgb(channel(0)?, channel(1)?, channel(2)?))
            }
            6 => Ok(Color::rgb(
                u8::from_str_radix(&digits[0..2], 16)?,
                u8::from_str_radix(&digits[2..4], 16)?,
                u8::from_str_radix(&digits[4..6], 16)?,
            )),
            8 => Ok(Color::rgba(
                u8::from_str_radix(&digits[0..2], 16)?,
                u8::from_str_radix(&digits[2..4], 16)?,
                u8::from_str_radix(&digits[4..6], 16)?,
                u8::from_str_radix(&digits[6..8], 16)?,
            )),
            _ => eyre::bail!("invalid hex color {hex:?}"),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        hex_color::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        hex_color::deserialize(deserializer)
    }
}

/// A renderable point marker ("circle"). The clustering engine treats it as an
/// opaque value apart from the position it exposes to the adjacency predicate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub radius: f32,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub label: Option<String>,
    /// How many source markers this one represents (1 for raw input markers,
    /// the member count for aggregates).
    #[serde(default = "default_weight")]
    pub weight: usize,
}

fn default_weight() -> usize {
    1
}

impl Marker {
    pub fn new(x: f64, y: f64, radius: f32) -> Self {
        Self {
            x,
            y,
            radius,
            color: Color::default(),
            label: None,
            weight: 1,
        }
    }
}

/// Loads a marker set from a JSON array.
pub fn markers_from_json(json: &str) -> Result<Vec<Marker>> {
    let markers: Vec<Marker> = serde_json::from_str(json)?;
    Ok(markers)
}

/// Screen-space rectangle in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelBounds {
    pub origin_x: f32,
    pub origin_y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelBounds {
    pub const fn new(origin_x: f32, origin_y: f32, width: f32, height: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.origin_x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin_y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.origin_x && x <= self.right() && y >= self.origin_y && y <= self.bottom()
    }
}

/// State for a single axis (X or Y): the visible domain plus optional hard
/// limits. Zoom and pan mutate the domain; the planners only read it.
#[derive(Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub min_limit: Option<f64>,
    pub max_limit: Option<f64>,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            ..Default::default()
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns the clamped bounds for planning/rendering.
    pub fn clamped_bounds(&self) -> (f64, f64) {
        let mut c_min = self.min;
        let mut c_max = self.max;
        if let Some(l) = self.min_limit {
            if c_min < l {
                c_min = l;
            }
            if c_max < l {
                c_max = l;
            }
        }
        if let Some(l) = self.max_limit {
            if c_max > l {
                c_max = l;
            }
            if c_min > l {
                c_min = l;
            }
        }
        (c_min, c_max)
    }

    /// Pure zoom without constraints to preserve the pivot point.
    pub fn zoom_at(&mut self, pivot_data: f64, pivot_pct: f64, factor: f64) {
        let new_span = self.span() * factor;
        self.min = pivot_data - new_span * pivot_pct;
        self.max = self.min + new_span;
    }

    pub fn pan(&mut self, delta_data: f64) {
        self.min += delta_data;
        self.max += delta_data;
    }

    /// Applies limits while preserving the span where possible.
    pub fn clamp(&mut self) {
        let (Some(min_l), Some(max_l)) = (self.min_limit, self.max_limit) else {
            // Only one or no limit: simple clamping
            if let Some(l) = self.min_limit {
                if self.min < l {
                    let s = self.span();
                    self.min = l;
                    self.max = l + s;
                }
            }
            if let Some(l) = self.max_limit {
                if self.max > l {
                    let s = self.span();
                    self.max = l;
                    self.min = l - s;
                }
            }
            return;
        };

        let limit_span = max_l - min_l;
        let current_span = self.span();

        if current_span <= limit_span {
            if self.min < min_l {
                self.min = min_l;
                self.max = min_l + current_span;
            } else if self.max > max_l {
                self.max = max_l;
                self.min = max_l - current_span;
            }
        } else if self.min > min_l {
            self.min = min_l;
            self.max = min_l + current_span;
        } else if self.max < max_l {
            self.max = max_l;
            self.min = max_l - current_span;
        }
    }
}
