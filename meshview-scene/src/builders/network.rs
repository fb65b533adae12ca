//! Buffers of networks

use crate::appearance::{Appearance, EdgeKey};
use crate::buffer::{LineBuffer, PointBuffer};
use meshview_core::{Error, NetworkQuery, NodeKey, Point3f, Result};

fn position(network: &dyn NetworkQuery, node: NodeKey) -> Result<Point3f> {
    network.node_position(node).ok_or(Error::UnknownNode(node))
}

/// One point per node, colored from the points color map
pub fn network_points(
    network: &dyn NetworkQuery,
    appearance: &Appearance,
) -> Result<Option<PointBuffer>> {
    if !appearance.show_points {
        return Ok(None);
    }
    let mut buffer = PointBuffer::new();
    for node in network.nodes() {
        let color = appearance.pointscolor.resolve(&node);
        buffer.push_primitive([(position(network, node)?, color)]);
    }
    Ok(Some(buffer))
}

/// One segment per edge
pub fn network_lines(
    network: &dyn NetworkQuery,
    appearance: &Appearance,
) -> Result<Option<LineBuffer>> {
    if !appearance.show_lines {
        return Ok(None);
    }
    let mut buffer = LineBuffer::new();
    for (u, v) in network.edges() {
        let color = appearance.linescolor.resolve(&EdgeKey::new(u, v));
        buffer.push_primitive([(position(network, u)?, color), (position(network, v)?, color)]);
    }
    Ok(Some(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::ColorMap;
    use meshview_core::{Color, Network};

    fn path() -> Network {
        Network::from_nodes_and_edges(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
            ],
            vec![(0, 1), (1, 2)],
        )
        .unwrap()
    }

    #[test]
    fn test_network_buffers() {
        let network = path();
        let mut appearance = Appearance {
            show_points: true,
            ..Appearance::default()
        };
        appearance.linescolor = ColorMap::new(Color::black()).with((2usize, 1usize), Color::red());

        let points = network_points(&network, &appearance).unwrap().unwrap();
        assert_eq!(points.elements, vec![[0], [1], [2]]);
        assert_eq!(points.positions[2], Point3f::new(1.0, 1.0, 0.0));

        let lines = network_lines(&network, &appearance).unwrap().unwrap();
        assert_eq!(lines.elements, vec![[0, 1], [2, 3]]);
        assert_eq!(lines.colors, vec![Color::black(), Color::black(), Color::red(), Color::red()]);
        assert!(lines.validate().is_ok());
    }

    #[test]
    fn test_hidden_lines() {
        let appearance = Appearance {
            show_lines: false,
            ..Appearance::default()
        };
        assert!(network_lines(&path(), &appearance).unwrap().is_none());
    }
}
