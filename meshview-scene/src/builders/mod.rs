//! Per-geometry buffer builders
//!
//! Each builder is a pure function of a geometry snapshot and an
//! [`Appearance`](crate::appearance::Appearance). A disabled primitive kind
//! yields `None`; broken geometry yields an error.

pub mod mesh;
pub mod network;
pub mod primitive;

pub use mesh::{mesh_faces, mesh_lines, mesh_points, FaceSide};
pub use network::{network_lines, network_points};
pub use primitive::{grid_lines, line_buffer, point_buffer};
