//! A renderer that uploads scene buffers and records draw commands
//!
//! The host owns shaders and render passes. Each frame it draws the scene
//! into a [`GpuDrawList`], then replays [`GpuDrawList::commands`] with the
//! uploaded buffers and textures.

use crate::device::GpuContext;
use crate::upload::{topology, GpuBuffers, GpuTexture};
use bytemuck::{Pod, Zeroable};
use meshview_core::{Color, Result};
use meshview_scene::{
    BufferKind, BufferTriple, DrawParams, FaceSide, ObjectId, Primitive, Renderer, TextDrawParams,
};
use std::collections::HashMap;
use tracing::debug;

/// Kind-specific settings of a recorded draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawStyle {
    Points { size: f32 },
    Lines { width: f32 },
    Faces { side: FaceSide },
    Text { height: i32, char_count: usize, color: Color },
}

/// One draw the host replays inside its render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub object: ObjectId,
    pub kind: BufferKind,
    pub transform: [[f32; 4]; 4],
    pub opacity: f32,
    pub style: DrawStyle,
}

/// Per-draw uniform block
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ObjectUniform {
    pub transform: [[f32; 4]; 4],
    /// Tag color; unused by other kinds
    pub text_color: [f32; 4],
    pub opacity: f32,
    /// Point size, line width or text height in pixels
    pub size: f32,
    pub text_num: u32,
    pub _padding: u32,
}

impl DrawCommand {
    pub fn uniform(&self) -> ObjectUniform {
        let (size, text_color, text_num) = match self.style {
            DrawStyle::Points { size } => (size, [0.0; 4], 0),
            DrawStyle::Lines { width } => (width, [0.0; 4], 0),
            DrawStyle::Faces { .. } => (0.0, [0.0; 4], 0),
            DrawStyle::Text {
                height,
                char_count,
                color,
            } => (height as f32, color.to_array(), char_count as u32),
        };
        ObjectUniform {
            transform: self.transform,
            text_color,
            opacity: self.opacity,
            size,
            text_num,
            _padding: 0,
        }
    }
}

struct Upload<T> {
    generation: u64,
    resource: T,
}

/// Uploads kept per object and buffer kind, refreshed when an object's
/// buffer generation changes
pub struct GpuDrawList {
    context: GpuContext,
    buffers: HashMap<(ObjectId, BufferKind), Upload<GpuBuffers>>,
    textures: HashMap<ObjectId, Upload<GpuTexture>>,
    commands: Vec<DrawCommand>,
    upload_count: usize,
}

impl GpuDrawList {
    pub fn new(context: GpuContext) -> Self {
        Self {
            context,
            buffers: HashMap::new(),
            textures: HashMap::new(),
            commands: Vec::new(),
            upload_count: 0,
        }
    }

    pub fn context(&self) -> &GpuContext {
        &self.context
    }

    /// Drop the commands of the previous frame, keeping uploads
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    /// Commands recorded since the last `begin_frame`, in draw order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn buffers(&self, object: ObjectId, kind: BufferKind) -> Option<&GpuBuffers> {
        self.buffers.get(&(object, kind)).map(|u| &u.resource)
    }

    pub fn texture(&self, object: ObjectId) -> Option<&GpuTexture> {
        self.textures.get(&object).map(|u| &u.resource)
    }

    /// Number of buffer and texture uploads performed so far
    pub fn upload_count(&self) -> usize {
        self.upload_count
    }

    /// Release every upload of a removed object
    pub fn forget(&mut self, object: ObjectId) {
        self.buffers.retain(|(id, _), _| *id != object);
        self.textures.remove(&object);
    }

    /// Upload `buffer` unless the current upload has the same generation
    ///
    /// Returns false when there is nothing to draw.
    fn ensure_buffers<const N: usize>(
        &mut self,
        object: ObjectId,
        kind: BufferKind,
        generation: u64,
        buffer: &BufferTriple<N>,
    ) -> Result<bool> {
        if buffer.is_empty() {
            self.buffers.remove(&(object, kind));
            return Ok(false);
        }
        let fresh = matches!(
            self.buffers.get(&(object, kind)),
            Some(upload) if upload.generation == generation
        );
        if !fresh {
            debug!(
                "Uploading {:?} of {} (generation {}, {} vertices)",
                kind,
                object,
                generation,
                buffer.vertex_count()
            );
            let label = format!("{} {:?}", object, kind);
            let resource = GpuBuffers::upload(&self.context, &label, buffer, topology(kind))?;
            self.buffers.insert((object, kind), Upload { generation, resource });
            self.upload_count += 1;
        }
        Ok(true)
    }
}

impl Renderer for GpuDrawList {
    fn draw(&mut self, params: &DrawParams<'_>) -> Result<()> {
        let kind = params.primitive.kind();
        let (drawable, style) = match params.primitive {
            Primitive::Points { buffer, size } => (
                self.ensure_buffers(params.object, kind, params.generation, buffer)?,
                DrawStyle::Points { size },
            ),
            Primitive::Lines { buffer, width } => (
                self.ensure_buffers(params.object, kind, params.generation, buffer)?,
                DrawStyle::Lines { width },
            ),
            Primitive::Faces { buffer, side } => (
                self.ensure_buffers(params.object, kind, params.generation, buffer)?,
                DrawStyle::Faces { side },
            ),
        };
        if drawable {
            self.commands.push(DrawCommand {
                object: params.object,
                kind,
                transform: params.transform.into(),
                opacity: params.opacity,
                style,
            });
        }
        Ok(())
    }

    fn draw_text(&mut self, params: &TextDrawParams<'_>) -> Result<()> {
        if params.text_num == 0 || params.texture.width == 0 {
            return Ok(());
        }
        if !self.ensure_buffers(params.object, BufferKind::Text, params.generation, params.anchor)? {
            return Ok(());
        }
        let fresh = matches!(
            self.textures.get(&params.object),
            Some(upload) if upload.generation == params.generation
        );
        if !fresh {
            let label = format!("{} glyphs", params.object);
            let resource = GpuTexture::upload(&self.context, &label, params.texture)?;
            self.textures.insert(
                params.object,
                Upload {
                    generation: params.generation,
                    resource,
                },
            );
            self.upload_count += 1;
        }
        self.commands.push(DrawCommand {
            object: params.object,
            kind: BufferKind::Text,
            transform: params.transform.into(),
            opacity: params.opacity,
            style: DrawStyle::Text {
                height: params.text_height,
                char_count: params.text_num,
                color: params.text_color,
            },
        });
        Ok(())
    }
}
