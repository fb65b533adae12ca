//! Color maps and color resolution
//!
//! Every color lookup is total: a [`ColorMap`] cannot be built without its
//! default entry, so resolution falls back to it instead of failing.
//! Precedence for per-vertex colors is
//!
//! 1. the vertex's own `color` attribute,
//! 2. an explicit entry for the vertex key in the map,
//! 3. the map's default.
//!
//! Presence decides, never the value itself: an explicit black wins over
//! any fallback.

use crate::config::SceneConfig;
use meshview_core::{Color, MeshQuery, VertexKey};
use std::collections::HashMap;
use std::hash::Hash;

/// Per-element colors with a mandatory default
#[derive(Debug, Clone)]
pub struct ColorMap<K> {
    default: Color,
    entries: HashMap<K, Color>,
}

impl<K: Eq + Hash> ColorMap<K> {
    /// A map holding only the default entry
    pub fn new(default: Color) -> Self {
        Self {
            default,
            entries: HashMap::new(),
        }
    }

    /// Builder-style insertion
    pub fn with(mut self, key: impl Into<K>, color: Color) -> Self {
        self.entries.insert(key.into(), color);
        self
    }

    /// Insert an explicit entry, returning the previous one
    pub fn insert(&mut self, key: impl Into<K>, color: Color) -> Option<Color> {
        self.entries.insert(key.into(), color)
    }

    /// The explicit entry for `key`, without falling back
    pub fn get(&self, key: &K) -> Option<Color> {
        self.entries.get(key).copied()
    }

    /// The `_default` entry, used for every key without an explicit entry
    pub fn default_color(&self) -> Color {
        self.default
    }

    pub fn set_default(&mut self, color: Color) {
        self.default = color;
    }

    /// Number of explicit entries, not counting the default
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The explicit entry for `key`, or the default
    pub fn resolve(&self, key: &K) -> Color {
        self.get(key).unwrap_or(self.default)
    }
}

/// Resolve the color of one element of a map
pub fn resolve_color<K: Eq + Hash>(map: &ColorMap<K>, key: &K) -> Color {
    map.resolve(key)
}

/// Undirected edge identifier: `(u, v)` and `(v, u)` are the same key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(usize, usize);

impl EdgeKey {
    pub fn new(u: usize, v: usize) -> Self {
        if u <= v {
            Self(u, v)
        } else {
            Self(v, u)
        }
    }

    /// The endpoints, smaller key first
    pub fn vertices(&self) -> (usize, usize) {
        (self.0, self.1)
    }
}

impl From<(usize, usize)> for EdgeKey {
    fn from((u, v): (usize, usize)) -> Self {
        Self::new(u, v)
    }
}

/// How a vertex without a color attribute is colored in vertex-color mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VertexColorFallback {
    /// Use the face color map: an entry keyed by the vertex, else its default
    ColorMap,
    /// Use a fixed color
    Fixed(Color),
}

/// Resolve the display color of a mesh vertex
pub fn resolve_vertex_color(
    mesh: &dyn MeshQuery,
    vertex: VertexKey,
    map: &ColorMap<usize>,
    fallback: VertexColorFallback,
) -> Color {
    match (mesh.vertex_color(vertex), fallback) {
        (Some(color), _) => color,
        (None, VertexColorFallback::ColorMap) => map.resolve(&vertex),
        (None, VertexColorFallback::Fixed(color)) => color,
    }
}

/// Display attributes of one scene object
#[derive(Debug, Clone)]
pub struct Appearance {
    pub show_points: bool,
    pub show_lines: bool,
    pub show_faces: bool,
    pub use_vertexcolors: bool,
    pub hide_coplanaredges: bool,
    pub pointscolor: ColorMap<usize>,
    pub linescolor: ColorMap<EdgeKey>,
    pub facescolor: ColorMap<usize>,
    pub pointssize: f32,
    pub lineswidth: f32,
    pub opacity: f32,
}

impl Appearance {
    /// Appearance with every attribute taken from the scene defaults
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            show_points: config.show_points,
            show_lines: config.show_lines,
            show_faces: config.show_faces,
            use_vertexcolors: config.use_vertexcolors,
            hide_coplanaredges: config.hide_coplanaredges,
            pointscolor: ColorMap::new(config.pointscolor),
            linescolor: ColorMap::new(config.linescolor),
            facescolor: ColorMap::new(config.facescolor),
            pointssize: config.pointssize,
            lineswidth: config.lineswidth,
            opacity: config.opacity,
        }
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshview_core::{Point3f, PolygonMesh};

    #[test]
    fn test_resolve_falls_back_to_default() {
        let map = ColorMap::<usize>::new(Color::grey()).with(2usize, Color::red());
        assert_eq!(resolve_color(&map, &2), Color::red());
        assert_eq!(resolve_color(&map, &7), Color::grey());
        assert_eq!(map.get(&7), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_explicit_black_is_not_a_miss() {
        let map = ColorMap::<usize>::new(Color::white()).with(0usize, Color::black());
        assert_eq!(map.resolve(&0), Color::black());
    }

    #[test]
    fn test_edge_key_is_unordered() {
        let map = ColorMap::<EdgeKey>::new(Color::black()).with((3usize, 1usize), Color::blue());
        assert_eq!(map.resolve(&EdgeKey::new(1, 3)), Color::blue());
        assert_eq!(map.resolve(&EdgeKey::new(3, 1)), Color::blue());
        assert_eq!(EdgeKey::new(5, 2).vertices(), (2, 5));
    }

    #[test]
    fn test_vertex_color_precedence() {
        let mut mesh = PolygonMesh::new();
        for i in 0..3 {
            mesh.add_vertex(Point3f::new(i as f32, 0.0, 0.0));
        }
        mesh.set_vertex_color(0, Color::black()).unwrap();
        let map = ColorMap::<usize>::new(Color::white()).with(1usize, Color::green());

        let policy = VertexColorFallback::ColorMap;
        assert_eq!(resolve_vertex_color(&mesh, 0, &map, policy), Color::black());
        assert_eq!(resolve_vertex_color(&mesh, 1, &map, policy), Color::green());
        assert_eq!(resolve_vertex_color(&mesh, 2, &map, policy), Color::white());

        let policy = VertexColorFallback::Fixed(Color::grey());
        assert_eq!(resolve_vertex_color(&mesh, 0, &map, policy), Color::black());
        assert_eq!(resolve_vertex_color(&mesh, 1, &map, policy), Color::grey());
    }
}
