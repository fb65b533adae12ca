//! Buffers of polygon meshes

use crate::appearance::{resolve_vertex_color, Appearance, EdgeKey, VertexColorFallback};
use crate::buffer::{FaceBuffer, LineBuffer, PointBuffer};
use crate::coplanar::is_coplanar_edge;
use itertools::Itertools;
use meshview_core::{centroid, Color, Error, MeshQuery, Point3f, Result, VertexKey};

/// Which side of the faces to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSide {
    /// Native winding
    Front,
    /// Reversed winding, so back faces survive culling
    Back,
}

impl FaceSide {
    /// Vertex-color fallback for vertices without a color attribute
    ///
    /// Front faces fall back to the face color map; back faces to grey.
    pub fn vertex_color_fallback(self) -> VertexColorFallback {
        match self {
            FaceSide::Front => VertexColorFallback::ColorMap,
            FaceSide::Back => VertexColorFallback::Fixed(Color::grey()),
        }
    }
}

fn position(mesh: &dyn MeshQuery, vertex: VertexKey) -> Result<Point3f> {
    mesh.vertex_position(vertex).ok_or(Error::UnknownVertex(vertex))
}

/// One point per vertex, colored from the points color map
pub fn mesh_points(mesh: &dyn MeshQuery, appearance: &Appearance) -> Result<Option<PointBuffer>> {
    if !appearance.show_points {
        return Ok(None);
    }
    let mut buffer = PointBuffer::new();
    for vertex in mesh.vertices() {
        let color = appearance.pointscolor.resolve(&vertex);
        buffer.push_primitive([(position(mesh, vertex)?, color)]);
    }
    Ok(Some(buffer))
}

/// One segment per edge, skipping flat interior edges when requested
pub fn mesh_lines(mesh: &dyn MeshQuery, appearance: &Appearance) -> Result<Option<LineBuffer>> {
    if !appearance.show_lines {
        return Ok(None);
    }
    let mut buffer = LineBuffer::new();
    for (u, v) in mesh.edges() {
        let color = appearance.linescolor.resolve(&EdgeKey::new(u, v));
        if appearance.hide_coplanaredges && is_coplanar_edge(mesh, (u, v))? {
            continue;
        }
        buffer.push_primitive([(position(mesh, u)?, color), (position(mesh, v)?, color)]);
    }
    Ok(Some(buffer))
}

/// Triangulated faces of one side
///
/// Triangles are emitted as is, quads `(a, b, c, d)` split into `(a, b, c)`
/// and `(a, c, d)`, and larger polygons fanned around their centroid with one
/// triangle per polygon edge. Every emitted vertex is unshared.
///
/// Without vertex colors every vertex gets the face color. With them, each
/// vertex gets its own color and the centroid the mean of the polygon's
/// vertex colors.
pub fn mesh_faces(
    mesh: &dyn MeshQuery,
    appearance: &Appearance,
    side: FaceSide,
) -> Result<Option<FaceBuffer>> {
    if !appearance.show_faces {
        return Ok(None);
    }
    let fallback = side.vertex_color_fallback();
    let mut buffer = FaceBuffer::new();

    for face in mesh.faces() {
        let mut vertices = mesh.face_vertices(face).ok_or(Error::UnknownFace(face))?;
        if vertices.len() < 3 {
            return Err(Error::DegenerateFace {
                face,
                vertices: vertices.len(),
            });
        }
        if side == FaceSide::Back {
            vertices.reverse();
        }

        let face_color = appearance.facescolor.resolve(&face);
        let points = vertices
            .iter()
            .map(|&v| position(mesh, v))
            .collect::<Result<Vec<_>>>()?;
        let colors: Vec<Color> = if appearance.use_vertexcolors {
            vertices
                .iter()
                .map(|&v| resolve_vertex_color(mesh, v, &appearance.facescolor, fallback))
                .collect()
        } else {
            vec![face_color; vertices.len()]
        };
        let corner = |k: usize| (points[k], colors[k]);

        match vertices.len() {
            3 => buffer.push_primitive([corner(0), corner(1), corner(2)]),
            4 => {
                buffer.push_primitive([corner(0), corner(1), corner(2)]);
                buffer.push_primitive([corner(0), corner(2), corner(3)]);
            }
            _ => {
                let center = centroid(&points).ok_or(Error::UnknownFace(face))?;
                let center_color = if appearance.use_vertexcolors {
                    Color::average(&colors).unwrap_or(face_color)
                } else {
                    face_color
                };
                for (k, next) in (0..vertices.len()).circular_tuple_windows() {
                    buffer.push_primitive([corner(k), corner(next), (center, center_color)]);
                }
            }
        }
    }
    Ok(Some(buffer))
}
