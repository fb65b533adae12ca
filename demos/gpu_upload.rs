//! Upload a scene to the GPU and list the recorded draws
//!
//! Skips gracefully when no adapter is available.

use anyhow::Result;
use meshview_core::{Network, Point3f, PolygonMesh};
use meshview_gpu::{GpuContext, GpuDrawList};
use meshview_scene::{BufferKind, Camera, ObjectOptions, Scene, Tag};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let context = match pollster::block_on(GpuContext::new()) {
        Ok(context) => context,
        Err(e) => {
            warn!("No GPU available: {}", e);
            return Ok(());
        }
    };
    info!("Using adapter {}", context.adapter.get_info().name);

    let mut scene = Scene::default();
    let quad = PolygonMesh::from_vertices_and_faces(
        vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(1.0, 1.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
        ],
        vec![vec![0, 1, 2, 3]],
    )?;
    let quad = scene.add(quad, ObjectOptions::default());
    scene.add(
        Network::from_nodes_and_edges(
            vec![Point3f::new(2.0, 0.0, 0.0), Point3f::new(2.0, 1.0, 0.0)],
            vec![(0, 1)],
        )?,
        ObjectOptions::default(),
    );
    scene.add(
        Tag::new("quad", Point3f::new(0.5, 0.5, 0.5)).with_absolute_height(true),
        ObjectOptions::default(),
    );
    scene.init()?;

    let camera = Camera::default();
    let mut draw_list = GpuDrawList::new(context);
    for frame in 0..2 {
        draw_list.begin_frame();
        scene.draw(&mut draw_list, &camera)?;
        info!(
            "Frame {}: {} draws, {} uploads so far",
            frame,
            draw_list.commands().len(),
            draw_list.upload_count()
        );
    }

    for command in draw_list.commands() {
        info!("{} {:?}: {:?}", command.object, command.kind, command.style);
    }
    if let Some(buffers) = draw_list.buffers(quad, BufferKind::FrontFaces) {
        info!(
            "Quad front faces: {} vertices, {} indices",
            buffers.vertex_count, buffers.index_count
        );
    }

    Ok(())
}
