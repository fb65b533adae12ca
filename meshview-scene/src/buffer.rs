//! Position/color/element buffer triples

use meshview_core::{Color, Error, Point3f, Result};

/// Parallel position and color arrays plus index groups of size `N`
///
/// Invariants, checked by [`BufferTriple::validate`]:
/// - `colors.len() == positions.len()`
/// - every index of every element is `< positions.len()`
#[derive(Debug, Clone, PartialEq)]
pub struct BufferTriple<const N: usize> {
    pub positions: Vec<Point3f>,
    pub colors: Vec<Color>,
    pub elements: Vec<[u32; N]>,
}

/// One index per point
pub type PointBuffer = BufferTriple<1>;

/// Two indices per line segment
pub type LineBuffer = BufferTriple<2>;

/// Three indices per triangle
pub type FaceBuffer = BufferTriple<3>;

impl<const N: usize> BufferTriple<N> {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            colors: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Number of emitted vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of emitted primitives
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Emit `N` vertices and the primitive connecting them
    pub fn push_primitive(&mut self, vertices: [(Point3f, Color); N]) {
        let base = self.positions.len() as u32;
        let mut element = [0u32; N];
        for (k, (position, color)) in vertices.into_iter().enumerate() {
            self.positions.push(position);
            self.colors.push(color);
            element[k] = base + k as u32;
        }
        self.elements.push(element);
    }

    /// Check both buffer invariants
    pub fn validate(&self) -> Result<()> {
        if self.colors.len() != self.positions.len() {
            return Err(Error::InvalidData(format!(
                "{} colors for {} positions",
                self.colors.len(),
                self.positions.len()
            )));
        }
        let len = self.positions.len() as u32;
        if let Some(element) = self.elements.iter().find(|e| e.iter().any(|&i| i >= len)) {
            return Err(Error::InvalidData(format!(
                "element {:?} indexes past {} positions",
                element, len
            )));
        }
        Ok(())
    }

    /// Positions as a flat `[x, y, z, x, y, z, ...]` array
    pub fn flat_positions(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
    }

    /// Colors as a flat `[r, g, b, a, ...]` array
    pub fn flat_colors(&self) -> Vec<f32> {
        self.colors.iter().flat_map(|c| c.to_array()).collect()
    }

    /// Element indices as one flat array
    pub fn flat_elements(&self) -> Vec<u32> {
        self.elements.iter().flatten().copied().collect()
    }
}

impl<const N: usize> Default for BufferTriple<N> {
    fn default() -> Self {
        Self::new()
    }
}
