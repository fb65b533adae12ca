//! # meshview GPU
//!
//! Upload of scene buffers to the GPU using WGPU.
//!
//! [`GpuDrawList`] implements the scene's renderer seam: it uploads each
//! object's buffers and glyph textures when they change and records the
//! draws a host application replays inside its own render pass.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use meshview_gpu::{GpuContext, GpuDrawList};
//! use meshview_scene::{Camera, Scene};
//!
//! async fn example(scene: &Scene) -> meshview_core::Result<()> {
//!     let mut draw_list = GpuDrawList::new(GpuContext::new().await?);
//!     scene.draw(&mut draw_list, &Camera::default())?;
//!     for command in draw_list.commands() {
//!         let _uniform = command.uniform();
//!         // ... bind buffers and draw
//!     }
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod draw_list;
pub mod upload;

pub use device::GpuContext;
pub use draw_list::{DrawCommand, DrawStyle, GpuDrawList, ObjectUniform};
pub use upload::{index_data, interleave, topology, GpuBuffers, GpuTexture, SceneVertex};
