//! Camera-facing text labels

use crate::buffer::PointBuffer;
use crate::text::{rasterize_text, GlyphAtlas, GlyphCell, GlyphRasterizer};
use meshview_core::{Color, Point3f, Result, Transform3D};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Font used by tags that do not name one
pub const DEFAULT_FONT: &str = "FreeSans.ttf";

/// A text label anchored at a point and always facing the camera
///
/// Tags are values: once built they are not modified, and two tags are
/// equal when all of their fields are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    text: String,
    position: Point3f,
    color: Color,
    height: f32,
    absolute_height: bool,
    font: PathBuf,
}

impl Tag {
    /// A white, fixed-height tag of height 50 in the default font
    pub fn new(text: impl Into<String>, position: Point3f) -> Self {
        Self {
            text: text.into(),
            position,
            color: Color::white(),
            height: 50.0,
            absolute_height: false,
            font: PathBuf::from(DEFAULT_FONT),
        }
    }

    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub fn with_height(self, height: f32) -> Self {
        Self { height, ..self }
    }

    /// Scale the displayed height with the distance to the camera
    pub fn with_absolute_height(self, absolute_height: bool) -> Self {
        Self {
            absolute_height,
            ..self
        }
    }

    pub fn with_font(self, font: impl Into<PathBuf>) -> Self {
        Self {
            font: font.into(),
            ..self
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point3f {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn absolute_height(&self) -> bool {
        self.absolute_height
    }

    pub fn font(&self) -> &Path {
        &self.font
    }

    /// Number of characters in the text
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// A copy of this tag with its anchor transformed
    pub fn transformed(&self, transform: &Transform3D) -> Self {
        Self {
            position: transform.transform_point(&self.position),
            ..self.clone()
        }
    }

    /// Displayed text height in pixels for a camera at `camera_position`
    ///
    /// In absolute-height mode the height is `10 * height / distance`,
    /// truncated; otherwise the nominal height, truncated. A camera sitting
    /// on the anchor gets the nominal height.
    pub fn text_height(&self, camera_position: &Point3f) -> i32 {
        if !self.absolute_height {
            return self.height as i32;
        }
        let distance = (self.position - camera_position).norm();
        if distance <= f32::EPSILON {
            return self.height as i32;
        }
        ((10.0 * self.height) / distance) as i32
    }
}

/// Derived buffers of a tag: the anchor vertex and the glyph texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextBuffer {
    /// One vertex at the anchor with the tag color, drawn as one sprite
    pub anchor: PointBuffer,
    pub texture: GlyphAtlas,
}

impl TextBuffer {
    /// Number of sprites to draw
    pub fn sprite_count(&self) -> usize {
        self.anchor.element_count()
    }
}

/// Rasterize a tag's text and build its anchor buffer
pub fn build_text_buffer(tag: &Tag, rasterizer: &dyn GlyphRasterizer) -> Result<TextBuffer> {
    let texture = rasterize_text(tag.text(), tag.font(), GlyphCell::default(), rasterizer)?;
    let mut anchor = PointBuffer::new();
    anchor.push_primitive([(tag.position(), tag.color())]);
    Ok(TextBuffer { anchor, texture })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FallbackGlyphs;
    use meshview_core::Vector3f;

    #[test]
    fn test_fixed_height_ignores_camera() {
        let tag = Tag::new("a", Point3f::origin()).with_height(12.7);
        assert_eq!(tag.text_height(&Point3f::new(0.0, 0.0, 100.0)), 12);
        assert_eq!(tag.text_height(&Point3f::new(0.0, 0.0, 1.0)), 12);
    }

    #[test]
    fn test_absolute_height_scales_with_distance() {
        let tag = Tag::new("a", Point3f::origin()).with_absolute_height(true);
        assert_eq!(tag.text_height(&Point3f::new(0.0, 0.0, 10.0)), 50);
        assert_eq!(tag.text_height(&Point3f::new(0.0, 3.0, 4.0)), 100);
        assert_eq!(tag.text_height(&Point3f::new(0.0, 0.0, 3.0)), 166);
        assert_eq!(tag.text_height(&Point3f::origin()), 50);
    }

    #[test]
    fn test_structural_equality() {
        let a = Tag::new("label", Point3f::new(1.0, 2.0, 3.0)).with_color(Color::red());
        let b = Tag::new("label", Point3f::new(1.0, 2.0, 3.0)).with_color(Color::red());
        assert_eq!(a, b);
        assert_ne!(a, b.clone().with_font("Other.ttf"));
        assert_ne!(a, b.with_absolute_height(true));
    }

    #[test]
    fn test_transformed_moves_anchor_only() {
        let tag = Tag::new("a", Point3f::origin());
        let moved = tag.transformed(&Transform3D::translation(Vector3f::new(1.0, 0.0, 0.0)));
        assert_eq!(moved.position(), Point3f::new(1.0, 0.0, 0.0));
        assert_eq!(tag.position(), Point3f::origin());
        assert_eq!(moved.text(), "a");
    }

    #[test]
    fn test_text_buffer() {
        let tag = Tag::new("AB", Point3f::new(1.0, 1.0, 1.0)).with_color(Color::blue());
        let buffer = build_text_buffer(&tag, &FallbackGlyphs).unwrap();

        assert_eq!(buffer.anchor.positions, vec![Point3f::new(1.0, 1.0, 1.0)]);
        assert_eq!(buffer.anchor.colors, vec![Color::blue()]);
        assert_eq!(buffer.anchor.elements, vec![[0]]);
        assert_eq!(buffer.sprite_count(), 1);
        assert_eq!((buffer.texture.width, buffer.texture.height), (96, 80));
    }
}
