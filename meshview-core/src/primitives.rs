//! Simple geometric primitives

use crate::{point::*, traits::Transformable, transform::Transform3D};
use serde::{Deserialize, Serialize};

/// A line segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point3f,
    pub end: Point3f,
}

impl Line {
    pub fn new(start: Point3f, end: Point3f) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        (self.end - self.start).norm()
    }

    pub fn midpoint(&self) -> Point3f {
        nalgebra::center(&self.start, &self.end)
    }
}

impl Transformable for Line {
    fn transform(&mut self, transform: &Transform3D) {
        self.start = transform.transform_point(&self.start);
        self.end = transform.transform_point(&self.end);
    }
}

/// A rectangular grid in the XY plane, centered on the origin
///
/// `dx` and `dy` are the overall extents, `nx` and `ny` the number of cells
/// along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub dx: f32,
    pub nx: usize,
    pub dy: f32,
    pub ny: usize,
}

impl Grid {
    pub fn new(dx: f32, nx: usize, dy: f32, ny: usize) -> Self {
        Self { dx, nx, dy, ny }
    }

    /// Grid lines: `nx + 1` lines parallel to Y, then `ny + 1` parallel to X
    pub fn lines(&self) -> Vec<Line> {
        let (hx, hy) = (self.dx / 2.0, self.dy / 2.0);
        let mut lines = Vec::with_capacity(self.nx + self.ny + 2);

        for i in 0..=self.nx {
            let x = if self.nx == 0 { 0.0 } else { -hx + self.dx * i as f32 / self.nx as f32 };
            lines.push(Line::new(Point3f::new(x, -hy, 0.0), Point3f::new(x, hy, 0.0)));
        }
        for j in 0..=self.ny {
            let y = if self.ny == 0 { 0.0 } else { -hy + self.dy * j as f32 / self.ny as f32 };
            lines.push(Line::new(Point3f::new(-hx, y, 0.0), Point3f::new(hx, y, 0.0)));
        }
        lines
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(10.0, 10, 10.0, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_lines() {
        let grid = Grid::new(2.0, 2, 4.0, 1);
        let lines = grid.lines();
        assert_eq!(lines.len(), 3 + 2);

        assert_relative_eq!(lines[0].start, Point3f::new(-1.0, -2.0, 0.0));
        assert_relative_eq!(lines[1].start, Point3f::new(0.0, -2.0, 0.0));
        assert_relative_eq!(lines[2].end, Point3f::new(1.0, 2.0, 0.0));
        assert_relative_eq!(lines[4].start, Point3f::new(-1.0, 2.0, 0.0));
    }

    #[test]
    fn test_line_metrics() {
        let line = Line::new(Point3f::origin(), Point3f::new(0.0, 3.0, 4.0));
        assert_relative_eq!(line.length(), 5.0);
        assert_relative_eq!(line.midpoint(), Point3f::new(0.0, 1.5, 2.0));
    }
}
