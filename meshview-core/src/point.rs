//! Point and vector types

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Centroid of a set of points, `None` when the set is empty
pub fn centroid(points: &[Point3f]) -> Option<Point3f> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3f::zeros(), |acc, p| acc + p.coords);
    Some(Point3f::from(sum / points.len() as f32))
}
