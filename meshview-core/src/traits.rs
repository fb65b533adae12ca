//! Core traits for meshview
//!
//! The buffer builders never touch a concrete data structure: they read
//! geometry through [`MeshQuery`] and [`NetworkQuery`]. Implementations must
//! be stable for the duration of one buffer build.

use crate::{color::Color, point::*, transform::Transform3D};
use serde::{Deserialize, Serialize};

/// Identifier of a mesh vertex
pub type VertexKey = usize;

/// Identifier of a mesh face
pub type FaceKey = usize;

/// Identifier of a network node
pub type NodeKey = usize;

/// Name of the vertex attribute holding a per-vertex color
pub const COLOR_ATTRIBUTE: &str = "color";

/// A dynamically typed element attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Color(Color),
    Scalar(f32),
    Flag(bool),
    Text(String),
}

impl AttributeValue {
    /// The contained color, if this attribute holds one
    pub fn as_color(&self) -> Option<Color> {
        match self {
            AttributeValue::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl From<Color> for AttributeValue {
    fn from(c: Color) -> Self {
        AttributeValue::Color(c)
    }
}

/// Read-only query surface of a polygon mesh
pub trait MeshQuery {
    /// Vertex identifiers in enumeration order
    fn vertices(&self) -> Vec<VertexKey>;

    /// Face identifiers in enumeration order
    fn faces(&self) -> Vec<FaceKey>;

    /// Vertices of a face in winding order
    fn face_vertices(&self, face: FaceKey) -> Option<Vec<VertexKey>>;

    /// Each undirected edge exactly once, in enumeration order
    fn edges(&self) -> Vec<(VertexKey, VertexKey)>;

    /// Faces on either side of an edge; `None` on an open side
    fn edge_faces(&self, edge: (VertexKey, VertexKey)) -> (Option<FaceKey>, Option<FaceKey>);

    fn face_center(&self, face: FaceKey) -> Option<Point3f>;

    fn vertex_position(&self, vertex: VertexKey) -> Option<Point3f>;

    fn vertex_attribute(&self, vertex: VertexKey, name: &str) -> Option<AttributeValue>;

    /// Whether the edge has a face on one side only
    fn is_edge_on_boundary(&self, edge: (VertexKey, VertexKey)) -> bool {
        let (a, b) = self.edge_faces(edge);
        a.is_none() || b.is_none()
    }

    /// Coordinates of both edge endpoints
    fn edge_coordinates(&self, edge: (VertexKey, VertexKey)) -> Option<(Point3f, Point3f)> {
        Some((self.vertex_position(edge.0)?, self.vertex_position(edge.1)?))
    }

    /// The color attribute of a vertex, if set and actually a color
    fn vertex_color(&self, vertex: VertexKey) -> Option<Color> {
        self.vertex_attribute(vertex, COLOR_ATTRIBUTE)
            .and_then(|value| value.as_color())
    }
}

/// Read-only query surface of a graph embedded in 3D
pub trait NetworkQuery {
    /// Node identifiers in enumeration order
    fn nodes(&self) -> Vec<NodeKey>;

    fn node_position(&self, node: NodeKey) -> Option<Point3f>;

    /// Edges as node pairs, in enumeration order
    fn edges(&self) -> Vec<(NodeKey, NodeKey)>;
}

/// Trait for objects that can be transformed
pub trait Transformable {
    /// Apply a transformation to the object
    fn transform(&mut self, transform: &Transform3D);
}
