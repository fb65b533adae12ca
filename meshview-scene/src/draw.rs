//! Draw parameters handed to a renderer
//!
//! Scene objects do not talk to a graphics API. Drawing an object produces
//! one [`DrawParams`] per built primitive kind (and a [`TextDrawParams`] for
//! tags) and passes it to a [`Renderer`], which owns uploads and shaders.

use crate::buffer::{FaceBuffer, LineBuffer, PointBuffer};
use crate::builders::FaceSide;
use crate::object::ObjectId;
use crate::text::GlyphAtlas;
use meshview_core::{Color, Result};
use nalgebra::Matrix4;

/// The derived buffers a scene object can own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BufferKind {
    Points,
    Lines,
    FrontFaces,
    BackFaces,
    Text,
}

/// A built buffer plus its kind-specific draw settings
#[derive(Debug, Clone, Copy)]
pub enum Primitive<'a> {
    Points { buffer: &'a PointBuffer, size: f32 },
    Lines { buffer: &'a LineBuffer, width: f32 },
    Faces { buffer: &'a FaceBuffer, side: FaceSide },
}

impl Primitive<'_> {
    pub fn kind(&self) -> BufferKind {
        match self {
            Primitive::Points { .. } => BufferKind::Points,
            Primitive::Lines { .. } => BufferKind::Lines,
            Primitive::Faces { side: FaceSide::Front, .. } => BufferKind::FrontFaces,
            Primitive::Faces { side: FaceSide::Back, .. } => BufferKind::BackFaces,
        }
    }
}

/// Everything needed to draw one buffer of one object
#[derive(Debug, Clone, Copy)]
pub struct DrawParams<'a> {
    pub object: ObjectId,
    /// Changes whenever the object's buffers are rebuilt
    pub generation: u64,
    pub transform: Matrix4<f32>,
    pub opacity: f32,
    pub primitive: Primitive<'a>,
}

/// Everything needed to draw a tag
#[derive(Debug, Clone, Copy)]
pub struct TextDrawParams<'a> {
    pub object: ObjectId,
    pub generation: u64,
    pub transform: Matrix4<f32>,
    pub opacity: f32,
    /// Displayed height in pixels
    pub text_height: i32,
    /// Number of characters laid out in the texture
    pub text_num: usize,
    pub text_color: Color,
    pub texture: &'a GlyphAtlas,
    /// The anchor vertex the sprite is expanded from
    pub anchor: &'a PointBuffer,
}

/// Receiver of draw calls
pub trait Renderer {
    fn draw(&mut self, params: &DrawParams<'_>) -> Result<()>;

    fn draw_text(&mut self, params: &TextDrawParams<'_>) -> Result<()>;
}
