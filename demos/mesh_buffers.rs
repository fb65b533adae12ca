//! Buffer statistics for a small scene
//!
//! Builds a prism mesh (two n-gon caps and quad sides), a network, a grid
//! and a few primitives, initializes the scene and logs what every object
//! produced.
//!
//! ```text
//! RUST_LOG=debug cargo run --bin mesh_buffers -- --sides 6 --vertex-colors
//! ```

use anyhow::Result;
use clap::Parser;
use meshview_core::{Color, Grid, Line, Network, Point3f, PolygonMesh, Vector3f};
use meshview_scene::{
    ColorMap, FallbackGlyphs, Geometry, ObjectOptions, ObjectTransform, Scene, SceneConfig, Tag,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene configuration JSON; built-in defaults when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of sides of the prism caps
    #[arg(short, long, default_value_t = 5)]
    sides: usize,

    /// Color faces by their vertex colors
    #[arg(long)]
    vertex_colors: bool,

    /// Hide edges between coplanar faces
    #[arg(long)]
    hide_coplanar: bool,
}

fn prism(sides: usize) -> Result<PolygonMesh> {
    let mut mesh = PolygonMesh::new();
    let ring = |z: f32| {
        (0..sides)
            .map(|k| {
                let angle = std::f32::consts::TAU * k as f32 / sides as f32;
                Point3f::new(angle.cos(), angle.sin(), z)
            })
            .collect::<Vec<_>>()
    };
    let bottom: Vec<usize> = ring(0.0).into_iter().map(|p| mesh.add_vertex(p)).collect();
    let top: Vec<usize> = ring(1.0).into_iter().map(|p| mesh.add_vertex(p)).collect();

    for (k, &vertex) in top.iter().enumerate() {
        let t = k as f32 / sides as f32;
        mesh.set_vertex_color(vertex, Color::new(t, 0.2, 1.0 - t))?;
    }

    let bottom_cap: Vec<usize> = bottom.iter().rev().copied().collect();
    mesh.add_face(&bottom_cap)?;
    mesh.add_face(&top)?;
    for k in 0..sides {
        let next = (k + 1) % sides;
        mesh.add_face(&[bottom[k], bottom[next], top[next], top[k]])?;
    }
    Ok(mesh)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.sides >= 3, "a prism needs at least 3 sides");

    let config = match &args.config {
        Some(path) => SceneConfig::from_json_file(path)?,
        None => SceneConfig::default(),
    };
    let mut scene = Scene::new(config, Box::new(FallbackGlyphs));

    let mesh = Arc::new(prism(args.sides)?);
    info!(
        "Prism with {} vertices, {} faces, {} edges",
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.edge_count()
    );
    scene.add(
        mesh,
        ObjectOptions {
            name: Some("prism".to_string()),
            show_points: Some(true),
            use_vertexcolors: Some(args.vertex_colors),
            hide_coplanaredges: Some(args.hide_coplanar),
            facescolor: Some(ColorMap::new(Color::from_rgb255(200, 200, 200)).with(0usize, Color::red())),
            ..ObjectOptions::default()
        },
    );

    let network = Network::from_nodes_and_edges(
        vec![
            Point3f::new(3.0, 0.0, 0.0),
            Point3f::new(4.0, 0.0, 0.0),
            Point3f::new(4.0, 1.0, 0.0),
            Point3f::new(3.0, 1.0, 1.0),
        ],
        vec![(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)],
    )?;
    scene.add(network, ObjectOptions::default());

    scene.add(
        Grid::new(1.0, 10, 1.0, 10),
        ObjectOptions {
            name: Some("floor".to_string()),
            transform: ObjectTransform {
                translation: Vector3f::new(0.0, 0.0, -0.01),
                ..ObjectTransform::default()
            },
            ..ObjectOptions::default()
        },
    );
    scene.add(Point3f::new(-2.0, 0.0, 0.0), ObjectOptions::default());
    scene.add(
        Line::new(Point3f::new(-2.0, -1.0, 0.0), Point3f::new(-2.0, 1.0, 0.0)),
        ObjectOptions::default(),
    );
    scene.add(
        Geometry::Vector {
            vector: Vector3f::new(0.0, 0.0, 2.0),
            anchor: Point3f::new(0.0, 0.0, 1.0),
        },
        ObjectOptions::default(),
    );
    scene.add(
        Tag::new("prism", Point3f::new(0.0, 0.0, 1.5)).with_height(30.0),
        ObjectOptions::default(),
    );

    scene.init()?;

    for object in scene.objects() {
        let buffers = object.buffers();
        info!(
            "{}: points={} lines={} front={} back={} text={}",
            object.name(),
            buffers.points.as_ref().map_or(0, |b| b.element_count()),
            buffers.lines.as_ref().map_or(0, |b| b.element_count()),
            buffers.front_faces.as_ref().map_or(0, |b| b.element_count()),
            buffers.back_faces.as_ref().map_or(0, |b| b.element_count()),
            buffers.text.as_ref().map_or(0, |t| t.texture.pixels.len()),
        );
        buffers.validate()?;
    }

    Ok(())
}
