//! Coplanar edge detection
//!
//! An interior mesh edge is hidden when the centers of its two faces and its
//! two endpoints lie on a common plane, i.e. the faces meet flat.

use meshview_core::{Error, FaceKey, MeshQuery, Point3, Result, VertexKey};

/// Maximum plane deviation for an edge to count as flat
pub const COPLANAR_TOLERANCE: f64 = 1e-5;

/// Distance of four points from their best supporting plane
///
/// The plane passes through the three points spanning the largest triangle;
/// the deviation is the distance of the fourth point to it. Collinear or
/// coincident configurations have zero deviation.
pub fn plane_deviation(points: &[Point3<f64>; 4]) -> f64 {
    const TRIPLES: [([usize; 3], usize); 4] = [
        ([0, 1, 2], 3),
        ([0, 1, 3], 2),
        ([0, 2, 3], 1),
        ([1, 2, 3], 0),
    ];

    let best = TRIPLES
        .iter()
        .map(|&([a, b, c], rest)| {
            let normal = (points[b] - points[a]).cross(&(points[c] - points[a]));
            (normal, a, rest)
        })
        .max_by(|x, y| x.0.norm_squared().total_cmp(&y.0.norm_squared()));

    match best {
        Some((normal, a, rest)) if normal.norm() > f64::EPSILON => {
            (normal.normalize().dot(&(points[rest] - points[a]))).abs()
        }
        _ => 0.0,
    }
}

/// Whether four points are coplanar within `tol`
pub fn is_coplanar(points: &[Point3<f64>; 4], tol: f64) -> bool {
    plane_deviation(points) < tol
}

/// Face center accumulated in double precision
fn face_center(mesh: &dyn MeshQuery, face: FaceKey) -> Result<Point3<f64>> {
    let vertices = mesh.face_vertices(face).ok_or(Error::UnknownFace(face))?;
    if vertices.is_empty() {
        return Err(Error::DegenerateFace { face, vertices: 0 });
    }
    let mut sum = Point3::<f64>::origin().coords;
    for &vertex in &vertices {
        let position = mesh
            .vertex_position(vertex)
            .ok_or(Error::UnknownVertex(vertex))?;
        sum += position.cast::<f64>().coords;
    }
    Ok(Point3::from(sum / vertices.len() as f64))
}

/// Whether an edge should be hidden because its two faces meet flat
///
/// Boundary edges are never hidden.
pub fn is_coplanar_edge(mesh: &dyn MeshQuery, edge: (VertexKey, VertexKey)) -> Result<bool> {
    if mesh.is_edge_on_boundary(edge) {
        return Ok(false);
    }
    let (Some(f1), Some(f2)) = mesh.edge_faces(edge) else {
        return Err(Error::InvalidData(format!(
            "edge ({}, {}) is interior but lacks an adjacent face",
            edge.0, edge.1
        )));
    };
    let c1 = face_center(mesh, f1)?;
    let c2 = face_center(mesh, f2)?;
    let (u, v) = mesh
        .edge_coordinates(edge)
        .ok_or_else(|| {
            Error::InvalidData(format!(
                "edge ({}, {}) has an unknown endpoint",
                edge.0, edge.1
            ))
        })?;

    Ok(is_coplanar(
        &[c1, c2, u.cast::<f64>(), v.cast::<f64>()],
        COPLANAR_TOLERANCE,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use meshview_core::{Point3f, PolygonMesh};

    /// Two unit squares sharing the edge (1, 2); the far side is lifted by `lift`
    fn hinge(lift: f32) -> PolygonMesh {
        PolygonMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(2.0, 0.0, lift),
                Point3f::new(2.0, 1.0, lift),
            ],
            vec![vec![0, 1, 2, 3], vec![1, 4, 5, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_plane_deviation() {
        let flat = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        assert_relative_eq!(plane_deviation(&flat), 0.0);

        let mut bent = flat;
        bent[3].z = 1e-2;
        assert_relative_eq!(plane_deviation(&bent), 1e-2, epsilon = 1e-4);
        assert!(!is_coplanar(&bent, COPLANAR_TOLERANCE));

        let mut nearly = flat;
        nearly[3].z = 1e-6;
        assert!(is_coplanar(&nearly, COPLANAR_TOLERANCE));
    }

    #[test]
    fn test_collinear_points_are_coplanar() {
        let line = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ];
        assert_eq!(plane_deviation(&line), 0.0);
    }

    #[test]
    fn test_flat_interior_edge_is_hidden() {
        let mesh = hinge(0.0);
        assert!(is_coplanar_edge(&mesh, (1, 2)).unwrap());
    }

    #[test]
    fn test_folded_interior_edge_is_kept() {
        let mesh = hinge(0.5);
        assert!(!is_coplanar_edge(&mesh, (1, 2)).unwrap());
    }

    /// Two triangles on the plane `z = x/2 + y/4 + offset`, sharing the edge (1, 2)
    fn tilted_triangles(x: f32, y: f32, size: f32, offset: f32) -> PolygonMesh {
        let lift = |x: f32, y: f32| Point3f::new(x, y, 0.5 * x + 0.25 * y + offset);
        PolygonMesh::from_vertices_and_faces(
            vec![
                lift(x, y),
                lift(x + size, y),
                lift(x, y + size),
                lift(x + size, y + size),
            ],
            vec![vec![0, 1, 2], vec![1, 3, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_flat_edges_far_from_origin_are_hidden() {
        for offset in [50.0, 100.0, 500.0] {
            for k in 0..20 {
                let x = offset + k as f32;
                let y = offset - 2.0 * k as f32;
                let size = 1.0 + (k % 4) as f32;
                let mesh = tilted_triangles(x, y, size, offset);
                assert!(
                    is_coplanar_edge(&mesh, (1, 2)).unwrap(),
                    "flat hinge at {}, {} (size {}) kept its edge",
                    x,
                    y,
                    size
                );
            }
        }
    }

    #[test]
    fn test_boundary_edge_is_never_hidden() {
        let mesh = hinge(0.0);
        assert!(!is_coplanar_edge(&mesh, (0, 1)).unwrap());
        assert!(!is_coplanar_edge(&mesh, (4, 5)).unwrap());
    }
}
