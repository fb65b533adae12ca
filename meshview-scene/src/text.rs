//! Text rasterization into single-channel glyph atlases
//!
//! Font loading and glyph rendering belong to an external font library,
//! reached through [`GlyphRasterizer`]. This module lays the rendered glyphs
//! out into one wide luminance image, one fixed-size cell per character.

use meshview_core::{Error, Result};
use std::path::Path;
use tracing::warn;

/// A rendered glyph: `rows` lines of `width` luminance bytes, top row first
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub rows: u32,
    pub buffer: Vec<u8>,
}

impl GlyphBitmap {
    pub fn new(width: u32, rows: u32, buffer: Vec<u8>) -> Result<Self> {
        if buffer.len() != (width * rows) as usize {
            return Err(Error::Font(format!(
                "glyph bitmap of {}x{} holds {} bytes",
                width,
                rows,
                buffer.len()
            )));
        }
        Ok(Self { width, rows, buffer })
    }

    fn pixel(&self, row: u32, column: u32) -> u8 {
        self.buffer[(row * self.width + column) as usize]
    }
}

/// Font library seam: renders one character of a font at a pixel size
pub trait GlyphRasterizer {
    fn rasterize(&self, font: &Path, ch: char, pixel_size: u32) -> Result<GlyphBitmap>;
}

/// Size of the cell each character occupies in an atlas, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    pub width: u32,
    pub height: u32,
}

impl Default for GlyphCell {
    fn default() -> Self {
        Self {
            width: 48,
            height: 80,
        }
    }
}

/// A single-channel image holding a whole string, row 0 at the top
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphAtlas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl GlyphAtlas {
    fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
        }
    }

    pub fn pixel(&self, row: u32, column: u32) -> u8 {
        self.pixels[(row * self.width + column) as usize]
    }

    /// Copy a glyph into the cell starting at `x`, aligned to the bottom edge
    ///
    /// Parts of the glyph outside the cell are dropped: columns on the right,
    /// rows at the top.
    fn blit_bottom_aligned(&mut self, glyph: &GlyphBitmap, x: u32, cell: GlyphCell) {
        let columns = glyph.width.min(cell.width);
        let rows = glyph.rows.min(self.height);
        let skipped_rows = glyph.rows - rows;
        for r in 0..rows {
            let target_row = self.height - rows + r;
            for c in 0..columns {
                let index = (target_row * self.width + x + c) as usize;
                self.pixels[index] = glyph.pixel(skipped_rows + r, c);
            }
        }
    }
}

/// Render `text` into an atlas of `cell.height` rows and
/// `cell.width * char_count` columns
///
/// Spaces are left blank. Characters count as Unicode scalar values.
pub fn rasterize_text(
    text: &str,
    font: &Path,
    cell: GlyphCell,
    rasterizer: &dyn GlyphRasterizer,
) -> Result<GlyphAtlas> {
    let count = text.chars().count() as u32;
    let mut atlas = GlyphAtlas::blank(cell.width * count, cell.height);

    for (i, ch) in text.chars().enumerate() {
        if ch == ' ' {
            continue;
        }
        let glyph = rasterizer.rasterize(font, ch, cell.width)?;
        if glyph.buffer.len() != (glyph.width * glyph.rows) as usize {
            return Err(Error::Font(format!("malformed bitmap for {:?}", ch)));
        }
        if glyph.width > cell.width || glyph.rows > cell.height {
            warn!(
                "Glyph {:?} is {}x{}, clipped to {}x{} cell",
                ch, glyph.width, glyph.rows, cell.width, cell.height
            );
        }
        atlas.blit_bottom_aligned(&glyph, i as u32 * cell.width, cell);
    }

    Ok(atlas)
}

/// Font-independent rasterizer drawing every glyph as a solid box
///
/// Boxes are `pixel_size * 3 / 4` wide and `pixel_size` tall. Useful where no
/// font library is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGlyphs;

impl GlyphRasterizer for FallbackGlyphs {
    fn rasterize(&self, _font: &Path, _ch: char, pixel_size: u32) -> Result<GlyphBitmap> {
        let width = pixel_size * 3 / 4;
        let rows = pixel_size;
        GlyphBitmap::new(width, rows, vec![u8::MAX; (width * rows) as usize])
    }
}
