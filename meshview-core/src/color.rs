//! RGBA colors

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// An RGBA color with components in `[0, 1]`
///
/// Serialized as an `[r, g, b, a]` array; `[r, g, b]` is accepted on input
/// with alpha defaulting to 1.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "[f32; 4]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create an opaque color
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with an explicit alpha
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels
    pub fn from_rgb255(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Neutral mid grey
    pub const fn grey() -> Self {
        Self::new(0.5, 0.5, 0.5)
    }

    pub const fn red() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub const fn green() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    pub const fn blue() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn rgb(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Component-wise mean of a set of colors, `None` when the set is empty
    pub fn average(colors: &[Color]) -> Option<Color> {
        if colors.is_empty() {
            return None;
        }
        let n = colors.len() as f32;
        let sum = colors.iter().fold([0.0f32; 4], |mut acc, c| {
            acc[0] += c.r;
            acc[1] += c.g;
            acc[2] += c.b;
            acc[3] += c.a;
            acc
        });
        Some(Color::rgba(sum[0] / n, sum[1] / n, sum[2] / n, sum[3] / n))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }
}

impl From<[f32; 3]> for Color {
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

impl TryFrom<Vec<f32>> for Color {
    type Error = String;

    fn try_from(v: Vec<f32>) -> std::result::Result<Self, Self::Error> {
        match v.as_slice() {
            [r, g, b] => Ok(Color::new(*r, *g, *b)),
            [r, g, b, a] => Ok(Color::rgba(*r, *g, *b, *a)),
            _ => Err(format!("expected 3 or 4 color components, got {}", v.len())),
        }
    }
}
