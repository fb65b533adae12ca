//! Glyph atlas of a tag, printed as text
//!
//! Rasterizes a string with the font-independent fallback glyphs and prints
//! the atlas downsampled to terminal characters, along with the displayed
//! text height for a camera at a few distances.

use anyhow::Result;
use clap::Parser;
use meshview_core::Point3f;
use meshview_scene::{build_text_buffer, FallbackGlyphs, Tag};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text of the tag
    #[arg(default_value = "AB C")]
    text: String,

    /// Nominal height in pixels
    #[arg(long, default_value_t = 50.0)]
    height: f32,

    /// Scale the height with the camera distance
    #[arg(long)]
    absolute_height: bool,

    /// Atlas pixels per printed character
    #[arg(long, default_value_t = 8)]
    step: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.step > 0, "step must be positive");

    let tag = Tag::new(args.text, Point3f::origin())
        .with_height(args.height)
        .with_absolute_height(args.absolute_height);
    let buffer = build_text_buffer(&tag, &FallbackGlyphs)?;
    let atlas = &buffer.texture;
    info!(
        "{:?}: {} characters, atlas {}x{} ({} bytes)",
        tag.text(),
        tag.char_count(),
        atlas.width,
        atlas.height,
        atlas.pixels.len()
    );

    for row in (0..atlas.height).step_by(args.step as usize) {
        let line: String = (0..atlas.width)
            .step_by(args.step as usize)
            .map(|column| if atlas.pixel(row, column) > 0 { '#' } else { '.' })
            .collect();
        println!("{}", line);
    }

    for distance in [1.0, 5.0, 10.0, 50.0] {
        let camera = Point3f::new(0.0, 0.0, distance);
        info!("Camera at {:>4}: text height {}", distance, tag.text_height(&camera));
    }

    Ok(())
}
