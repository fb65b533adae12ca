//! Core data structures and traits for meshview
//!
//! This crate provides the geometry types the viewer draws (polygon meshes,
//! networks, lines and grids), colors, transformations, and the read-only
//! query traits the buffer builders consume.

pub mod point;
pub mod color;
pub mod mesh;
pub mod network;
pub mod primitives;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use color::*;
pub use mesh::*;
pub use network::*;
pub use primitives::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4, UnitQuaternion};
