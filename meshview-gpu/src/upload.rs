//! Upload of scene buffers and glyph atlases

use crate::device::GpuContext;
use bytemuck::{Pod, Zeroable};
use meshview_core::{Error, Result};
use meshview_scene::{BufferKind, BufferTriple, GlyphAtlas};

/// Interleaved vertex data for every primitive kind
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl SceneVertex {
    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SceneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Pair each position with its color
pub fn interleave<const N: usize>(buffer: &BufferTriple<N>) -> Vec<SceneVertex> {
    buffer
        .positions
        .iter()
        .zip(&buffer.colors)
        .map(|(p, c)| SceneVertex {
            position: [p.x, p.y, p.z],
            color: c.to_array(),
        })
        .collect()
}

/// Element groups flattened into an index list
pub fn index_data<const N: usize>(buffer: &BufferTriple<N>) -> Vec<u32> {
    buffer.flat_elements()
}

/// Topology the index list of a buffer kind is drawn with
///
/// Text anchors are single points the host expands into sprites.
pub fn topology(kind: BufferKind) -> wgpu::PrimitiveTopology {
    match kind {
        BufferKind::Points | BufferKind::Text => wgpu::PrimitiveTopology::PointList,
        BufferKind::Lines => wgpu::PrimitiveTopology::LineList,
        BufferKind::FrontFaces | BufferKind::BackFaces => wgpu::PrimitiveTopology::TriangleList,
    }
}

/// Vertex and index buffers of one built buffer triple
pub struct GpuBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    pub index_count: u32,
    pub topology: wgpu::PrimitiveTopology,
}

impl GpuBuffers {
    pub fn upload<const N: usize>(
        context: &GpuContext,
        label: &str,
        buffer: &BufferTriple<N>,
        topology: wgpu::PrimitiveTopology,
    ) -> Result<Self> {
        buffer.validate()?;
        let vertices = interleave(buffer);
        let indices = index_data(buffer);
        Ok(Self {
            vertex_buffer: context.create_buffer_init(
                &format!("{} vertices", label),
                &vertices,
                wgpu::BufferUsages::VERTEX,
            ),
            index_buffer: context.create_buffer_init(
                &format!("{} indices", label),
                &indices,
                wgpu::BufferUsages::INDEX,
            ),
            vertex_count: vertices.len() as u32,
            index_count: indices.len() as u32,
            topology,
        })
    }
}

/// A glyph atlas as a single-channel texture
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

impl GpuTexture {
    pub fn upload(context: &GpuContext, label: &str, atlas: &GlyphAtlas) -> Result<Self> {
        if atlas.width == 0 || atlas.height == 0 {
            return Err(Error::Gpu(format!("{} is an empty glyph atlas", label)));
        }
        let texture = context.create_texture_init(
            label,
            atlas.width,
            atlas.height,
            wgpu::TextureFormat::R8Unorm,
            &atlas.pixels,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self {
            texture,
            view,
            width: atlas.width,
            height: atlas.height,
        })
    }
}
