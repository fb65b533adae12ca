//! Polygon mesh data structure

use crate::{error::*, point::*, traits::*, transform::Transform3D};
use std::collections::{BTreeMap, HashMap};

/// A mesh with arbitrary polygonal faces
///
/// Faces keep their winding. Every directed half-edge `(u, v)` belongs to at
/// most one face, which is what makes edge/face adjacency well defined.
#[derive(Debug, Clone, Default)]
pub struct PolygonMesh {
    vertices: Vec<Point3f>,
    faces: Vec<Vec<VertexKey>>,
    vertex_attributes: Vec<BTreeMap<String, AttributeValue>>,
    halfedges: HashMap<(VertexKey, VertexKey), FaceKey>,
    edges: Vec<(VertexKey, VertexKey)>,
}

impl PolygonMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(
        vertices: Vec<Point3f>,
        faces: Vec<Vec<VertexKey>>,
    ) -> Result<Self> {
        let mut mesh = Self::new();
        for vertex in vertices {
            mesh.add_vertex(vertex);
        }
        for face in faces {
            mesh.add_face(&face)?;
        }
        Ok(mesh)
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> VertexKey {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        self.vertex_attributes.push(BTreeMap::new());
        index
    }

    /// Add a face to the mesh
    ///
    /// Fails when the face has fewer than three vertices, references a
    /// vertex that does not exist, repeats a vertex, or reuses a directed
    /// half-edge of another face.
    pub fn add_face(&mut self, face: &[VertexKey]) -> Result<FaceKey> {
        let key = self.faces.len();
        if face.len() < 3 {
            return Err(Error::DegenerateFace { face: key, vertices: face.len() });
        }
        if let Some(&missing) = face.iter().find(|&&v| v >= self.vertices.len()) {
            return Err(Error::UnknownVertex(missing));
        }
        for (i, v) in face.iter().enumerate() {
            if face[i + 1..].contains(v) {
                return Err(Error::InvalidData(format!(
                    "face {} repeats vertex {}",
                    key, v
                )));
            }
        }
        let halfedges: Vec<(VertexKey, VertexKey)> = face
            .iter()
            .zip(face.iter().cycle().skip(1))
            .map(|(&u, &v)| (u, v))
            .collect();
        if let Some(&(u, v)) = halfedges.iter().find(|h| self.halfedges.contains_key(h)) {
            return Err(Error::InvalidData(format!(
                "half-edge ({}, {}) of face {} already belongs to face {}",
                u, v, key, self.halfedges[&(u, v)]
            )));
        }

        for &(u, v) in &halfedges {
            if !self.halfedges.contains_key(&(v, u)) {
                self.edges.push((u, v));
            }
            self.halfedges.insert((u, v), key);
        }
        self.faces.push(face.to_vec());
        Ok(key)
    }

    /// Set a named attribute on a vertex
    pub fn set_vertex_attribute(
        &mut self,
        vertex: VertexKey,
        name: impl Into<String>,
        value: AttributeValue,
    ) -> Result<()> {
        let attributes = self
            .vertex_attributes
            .get_mut(vertex)
            .ok_or(Error::UnknownVertex(vertex))?;
        attributes.insert(name.into(), value);
        Ok(())
    }

    /// Set the color attribute of a vertex
    pub fn set_vertex_color(&mut self, vertex: VertexKey, color: crate::Color) -> Result<()> {
        self.set_vertex_attribute(vertex, COLOR_ATTRIBUTE, AttributeValue::Color(color))
    }

    /// Vertex positions in key order
    pub fn positions(&self) -> &[Point3f] {
        &self.vertices
    }
}

impl MeshQuery for PolygonMesh {
    fn vertices(&self) -> Vec<VertexKey> {
        (0..self.vertices.len()).collect()
    }

    fn faces(&self) -> Vec<FaceKey> {
        (0..self.faces.len()).collect()
    }

    fn face_vertices(&self, face: FaceKey) -> Option<Vec<VertexKey>> {
        self.faces.get(face).cloned()
    }

    fn edges(&self) -> Vec<(VertexKey, VertexKey)> {
        self.edges.clone()
    }

    fn edge_faces(&self, (u, v): (VertexKey, VertexKey)) -> (Option<FaceKey>, Option<FaceKey>) {
        (
            self.halfedges.get(&(u, v)).copied(),
            self.halfedges.get(&(v, u)).copied(),
        )
    }

    fn face_center(&self, face: FaceKey) -> Option<Point3f> {
        let points = self
            .faces
            .get(face)?
            .iter()
            .map(|&v| self.vertices[v])
            .collect::<Vec<_>>();
        centroid(&points)
    }

    fn vertex_position(&self, vertex: VertexKey) -> Option<Point3f> {
        self.vertices.get(vertex).copied()
    }

    fn vertex_attribute(&self, vertex: VertexKey, name: &str) -> Option<AttributeValue> {
        self.vertex_attributes.get(vertex)?.get(name).cloned()
    }
}

impl Transformable for PolygonMesh {
    fn transform(&mut self, transform: &Transform3D) {
        for vertex in &mut self.vertices {
            *vertex = transform.transform_point(vertex);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn two_squares() -> PolygonMesh {
        PolygonMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(2.0, 0.0, 0.0),
                Point3f::new(2.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3], vec![1, 4, 5, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_edges_are_unique_and_ordered() {
        let mesh = two_squares();
        assert_eq!(
            mesh.edges(),
            vec![(0, 1), (1, 2), (2, 3), (3, 0), (1, 4), (4, 5), (5, 2)]
        );
        assert_eq!(mesh.edge_count(), 7);
    }

    #[test]
    fn test_edge_faces_and_boundary() {
        let mesh = two_squares();
        assert_eq!(mesh.edge_faces((1, 2)), (Some(0), Some(1)));
        assert!(!mesh.is_edge_on_boundary((1, 2)));
        assert!(!mesh.is_edge_on_boundary((2, 1)));
        assert_eq!(mesh.edge_faces((0, 1)), (Some(0), None));
        assert!(mesh.is_edge_on_boundary((0, 1)));
    }

    #[test]
    fn test_face_center() {
        let mesh = two_squares();
        assert_eq!(mesh.face_center(0), Some(Point3f::new(0.5, 0.5, 0.0)));
        assert_eq!(mesh.face_center(7), None);
    }

    #[test]
    fn test_rejects_invalid_faces() {
        let mut mesh = two_squares();
        assert!(matches!(
            mesh.add_face(&[0, 1]),
            Err(Error::DegenerateFace { face: 2, vertices: 2 })
        ));
        assert!(matches!(mesh.add_face(&[0, 1, 42]), Err(Error::UnknownVertex(42))));
        assert!(matches!(mesh.add_face(&[0, 1, 0]), Err(Error::InvalidData(_))));
        // (0, 1) is already used by face 0 with the same orientation
        assert!(matches!(mesh.add_face(&[0, 1, 5]), Err(Error::InvalidData(_))));
        assert_eq!(mesh.face_count(), 2);
    }

    #[test]
    fn test_vertex_color_attribute() {
        let mut mesh = two_squares();
        mesh.set_vertex_color(3, Color::black()).unwrap();
        mesh.set_vertex_attribute(4, "weight", AttributeValue::Scalar(2.0)).unwrap();

        assert_eq!(mesh.vertex_color(3), Some(Color::black()));
        assert_eq!(mesh.vertex_color(4), None);
        assert_eq!(mesh.vertex_color(0), None);
        assert!(mesh.set_vertex_color(99, Color::red()).is_err());
    }

    #[test]
    fn test_transform_moves_vertices() {
        let mut mesh = two_squares();
        mesh.transform(&Transform3D::translation(crate::Vector3f::new(0.0, 0.0, 1.0)));
        assert_eq!(mesh.vertex_position(0), Some(Point3f::new(0.0, 0.0, 1.0)));
    }
}
