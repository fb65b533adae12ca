//! Buffers of single points, segments, vectors and grids

use crate::appearance::{Appearance, EdgeKey};
use crate::buffer::{LineBuffer, PointBuffer};
use meshview_core::{Grid, Line, Point3f};

/// Points at the given positions, keyed by their order
pub fn point_buffer(points: &[Point3f], appearance: &Appearance) -> Option<PointBuffer> {
    if !appearance.show_points {
        return None;
    }
    let mut buffer = PointBuffer::new();
    for (i, &point) in points.iter().enumerate() {
        buffer.push_primitive([(point, appearance.pointscolor.resolve(&i))]);
    }
    Some(buffer)
}

/// Segments keyed as edges `(2i, 2i + 1)` of their endpoints
pub fn line_buffer(lines: &[Line], appearance: &Appearance) -> Option<LineBuffer> {
    if !appearance.show_lines {
        return None;
    }
    let mut buffer = LineBuffer::new();
    for (i, line) in lines.iter().enumerate() {
        let color = appearance.linescolor.resolve(&EdgeKey::new(2 * i, 2 * i + 1));
        buffer.push_primitive([(line.start, color), (line.end, color)]);
    }
    Some(buffer)
}

/// Grid lines of a grid
pub fn grid_lines(grid: &Grid, appearance: &Appearance) -> Option<LineBuffer> {
    line_buffer(&grid.lines(), appearance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::ColorMap;
    use meshview_core::Color;

    #[test]
    fn test_line_buffer_colors_by_segment() {
        let lines = [
            Line::new(Point3f::origin(), Point3f::new(1.0, 0.0, 0.0)),
            Line::new(Point3f::origin(), Point3f::new(0.0, 1.0, 0.0)),
        ];
        let mut appearance = Appearance::default();
        appearance.linescolor = ColorMap::new(Color::black()).with((2usize, 3usize), Color::red());

        let buffer = line_buffer(&lines, &appearance).unwrap();
        assert_eq!(buffer.elements, vec![[0, 1], [2, 3]]);
        assert_eq!(buffer.colors[1], Color::black());
        assert_eq!(buffer.colors[2], Color::red());
    }

    #[test]
    fn test_grid_line_count() {
        let buffer = grid_lines(&Grid::new(1.0, 4, 1.0, 2), &Appearance::default()).unwrap();
        assert_eq!(buffer.element_count(), 5 + 3);
        assert_eq!(buffer.vertex_count(), 16);
    }

    #[test]
    fn test_points_hidden_by_default() {
        assert!(point_buffer(&[Point3f::origin()], &Appearance::default()).is_none());
    }
}
