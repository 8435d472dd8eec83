//! Icon Palette
//!
//! Every color the renderer paints with. Loaded from the icon-set config or
//! taken from the built-in purple palette.

use image::Rgba;
use serde::{Deserialize, Serialize};

/// An RGBA fill value, serialized as `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn with_alpha(self, a: u8) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, a])
    }

    /// Linear interpolation toward `end`, channel values truncated.
    pub fn lerp(self, end: Color, ratio: f64) -> Self {
        let mix = |s: u8, e: u8| (s as f64 + (e as f64 - s as f64) * ratio) as u8;
        Self([
            mix(self.0[0], end.0[0]),
            mix(self.0[1], end.0[1]),
            mix(self.0[2], end.0[2]),
            255,
        ])
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba(c.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconStyle {
    /// Top-left end of the diagonal gradient; also the left zipper teeth.
    pub gradient_start: Color,
    /// Bottom-right end of the gradient; also the right zipper teeth.
    pub gradient_end: Color,
    pub box_fill: Color,
    pub gold: Color,
    pub gem: Color,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            gradient_start: Color::rgb(102, 126, 234), // #667eea
            gradient_end: Color::rgb(118, 75, 162),    // #764ba2
            box_fill: Color::rgba(255, 255, 255, 230),
            gold: Color::rgb(255, 215, 0),
            gem: Color::rgb(255, 100, 100),
        }
    }
}
