//! Scene objects and render buffer generation
//!
//! This crate turns geometry into flat buffers ready for indexed drawing:
//! - Color maps with mandatory defaults and vertex-color resolution
//! - Point, line and face buffers for meshes, networks and primitives
//! - Coplanar edge suppression
//! - Glyph atlases and anchor buffers for text tags
//! - Scene objects, the scene container and draw parameters for a renderer

pub mod appearance;
pub mod buffer;
pub mod builders;
pub mod camera;
pub mod config;
pub mod coplanar;
pub mod draw;
pub mod object;
pub mod scene;
pub mod tag;
pub mod text;

pub use appearance::*;
pub use buffer::*;
pub use builders::*;
pub use camera::*;
pub use config::*;
pub use coplanar::*;
pub use draw::*;
pub use object::*;
pub use scene::*;
pub use tag::*;
pub use text::*;
