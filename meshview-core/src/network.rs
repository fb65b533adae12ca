//! Network (graph) data structure

use crate::{error::*, point::*, traits::*, transform::Transform3D};
use serde::{Deserialize, Serialize};

/// A graph whose nodes have 3D positions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    nodes: Vec<Point3f>,
    edges: Vec<(NodeKey, NodeKey)>,
}

impl Network {
    /// Create a new empty network
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a network from node positions and edges
    pub fn from_nodes_and_edges(nodes: Vec<Point3f>, edges: Vec<(NodeKey, NodeKey)>) -> Result<Self> {
        let mut network = Self { nodes, edges: Vec::with_capacity(edges.len()) };
        for (u, v) in edges {
            network.add_edge(u, v)?;
        }
        Ok(network)
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if the network has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node to the network
    pub fn add_node(&mut self, position: Point3f) -> NodeKey {
        let key = self.nodes.len();
        self.nodes.push(position);
        key
    }

    /// Connect two existing nodes
    pub fn add_edge(&mut self, u: NodeKey, v: NodeKey) -> Result<()> {
        for node in [u, v] {
            if node >= self.nodes.len() {
                return Err(Error::UnknownNode(node));
            }
        }
        self.edges.push((u, v));
        Ok(())
    }
}

impl NetworkQuery for Network {
    fn nodes(&self) -> Vec<NodeKey> {
        (0..self.nodes.len()).collect()
    }

    fn node_position(&self, node: NodeKey) -> Option<Point3f> {
        self.nodes.get(node).copied()
    }

    fn edges(&self) -> Vec<(NodeKey, NodeKey)> {
        self.edges.clone()
    }
}

impl Transformable for Network {
    fn transform(&mut self, transform: &Transform3D) {
        for node in &mut self.nodes {
            *node = transform.transform_point(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_network() {
        let mut network = Network::new();
        let a = network.add_node(Point3f::new(0.0, 0.0, 0.0));
        let b = network.add_node(Point3f::new(1.0, 0.0, 0.0));
        network.add_edge(a, b).unwrap();

        assert_eq!(network.node_count(), 2);
        assert_eq!(network.edges(), vec![(0, 1)]);
        assert_eq!(network.node_position(b), Some(Point3f::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_edge_to_missing_node() {
        let result = Network::from_nodes_and_edges(vec![Point3f::origin()], vec![(0, 3)]);
        assert!(matches!(result, Err(Error::UnknownNode(3))));
    }
}
