//! Scene objects: a shared geometry plus display attributes and derived buffers

use crate::appearance::{Appearance, ColorMap, EdgeKey};
use crate::buffer::{FaceBuffer, LineBuffer, PointBuffer};
use crate::builders::{
    grid_lines, line_buffer, mesh_faces, mesh_lines, mesh_points, network_lines, network_points,
    point_buffer, FaceSide,
};
use crate::config::SceneConfig;
use crate::draw::{DrawParams, Primitive, Renderer, TextDrawParams};
use crate::tag::{build_text_buffer, Tag, TextBuffer};
use crate::text::GlyphRasterizer;
use meshview_core::{
    Grid, Line, MeshQuery, Network, NetworkQuery, Point3f, PolygonMesh, Result, Transform3D,
    Vector3f,
};
use nalgebra::Matrix4;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Stable identifier of an object within its scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The geometry wrapped by a scene object
///
/// Meshes, networks and tags are shared with the caller; the object only
/// reads them while building buffers.
#[derive(Clone)]
pub enum Geometry {
    Mesh(Arc<dyn MeshQuery + Send + Sync>),
    Network(Arc<dyn NetworkQuery + Send + Sync>),
    Point(Point3f),
    Line(Line),
    /// A vector drawn from `anchor` to `anchor + vector`
    Vector { vector: Vector3f, anchor: Point3f },
    Grid(Grid),
    Tag(Arc<Tag>),
}

impl Geometry {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Geometry::Mesh(_) => "mesh",
            Geometry::Network(_) => "network",
            Geometry::Point(_) => "point",
            Geometry::Line(_) => "line",
            Geometry::Vector { .. } => "vector",
            Geometry::Grid(_) => "grid",
            Geometry::Tag(_) => "tag",
        }
    }

    /// Kinds whose points are shown unless an option hides them
    fn shows_points_by_default(&self) -> bool {
        matches!(self, Geometry::Network(_) | Geometry::Point(_))
    }
}

impl fmt::Debug for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point(p) => f.debug_tuple("Point").field(p).finish(),
            Geometry::Line(l) => f.debug_tuple("Line").field(l).finish(),
            Geometry::Vector { vector, anchor } => f
                .debug_struct("Vector")
                .field("vector", vector)
                .field("anchor", anchor)
                .finish(),
            Geometry::Grid(g) => f.debug_tuple("Grid").field(g).finish(),
            Geometry::Tag(t) => f.debug_tuple("Tag").field(t).finish(),
            other => write!(f, "{}", other.kind_name()),
        }
    }
}

impl From<Arc<PolygonMesh>> for Geometry {
    fn from(mesh: Arc<PolygonMesh>) -> Self {
        Geometry::Mesh(mesh)
    }
}

impl From<PolygonMesh> for Geometry {
    fn from(mesh: PolygonMesh) -> Self {
        Geometry::Mesh(Arc::new(mesh))
    }
}

impl From<Arc<Network>> for Geometry {
    fn from(network: Arc<Network>) -> Self {
        Geometry::Network(network)
    }
}

impl From<Network> for Geometry {
    fn from(network: Network) -> Self {
        Geometry::Network(Arc::new(network))
    }
}

impl From<Point3f> for Geometry {
    fn from(point: Point3f) -> Self {
        Geometry::Point(point)
    }
}

impl From<Line> for Geometry {
    fn from(line: Line) -> Self {
        Geometry::Line(line)
    }
}

impl From<Grid> for Geometry {
    fn from(grid: Grid) -> Self {
        Geometry::Grid(grid)
    }
}

impl From<Tag> for Geometry {
    fn from(tag: Tag) -> Self {
        Geometry::Tag(Arc::new(tag))
    }
}

impl From<Arc<Tag>> for Geometry {
    fn from(tag: Arc<Tag>) -> Self {
        Geometry::Tag(tag)
    }
}

/// Translation, Euler rotation and scale of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    pub translation: Vector3f,
    /// Roll, pitch and yaw in radians
    pub rotation: Vector3f,
    pub scale: Vector3f,
}

impl ObjectTransform {
    /// The composed matrix `T * R * S`
    pub fn matrix(&self) -> Matrix4<f32> {
        Transform3D::from_components(self.translation, self.rotation, self.scale).matrix
    }
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            translation: Vector3f::zeros(),
            rotation: Vector3f::zeros(),
            scale: Vector3f::new(1.0, 1.0, 1.0),
        }
    }
}

/// Per-object overrides of the scene configuration; `None` keeps the config value
#[derive(Debug, Clone, Default)]
pub struct ObjectOptions {
    pub name: Option<String>,
    pub show_points: Option<bool>,
    pub show_lines: Option<bool>,
    pub show_faces: Option<bool>,
    pub use_vertexcolors: Option<bool>,
    pub hide_coplanaredges: Option<bool>,
    pub pointscolor: Option<ColorMap<usize>>,
    pub linescolor: Option<ColorMap<EdgeKey>>,
    pub facescolor: Option<ColorMap<usize>>,
    pub pointssize: Option<f32>,
    pub lineswidth: Option<f32>,
    pub opacity: Option<f32>,
    pub transform: ObjectTransform,
}

impl ObjectOptions {
    fn appearance(&self, geometry: &Geometry, config: &SceneConfig) -> Appearance {
        let defaults = Appearance::from_config(config);
        Appearance {
            show_points: self
                .show_points
                .unwrap_or(defaults.show_points || geometry.shows_points_by_default()),
            show_lines: self.show_lines.unwrap_or(defaults.show_lines),
            show_faces: self.show_faces.unwrap_or(defaults.show_faces),
            use_vertexcolors: self.use_vertexcolors.unwrap_or(defaults.use_vertexcolors),
            hide_coplanaredges: self.hide_coplanaredges.unwrap_or(defaults.hide_coplanaredges),
            pointscolor: self.pointscolor.clone().unwrap_or(defaults.pointscolor),
            linescolor: self.linescolor.clone().unwrap_or(defaults.linescolor),
            facescolor: self.facescolor.clone().unwrap_or(defaults.facescolor),
            pointssize: self.pointssize.unwrap_or(defaults.pointssize),
            lineswidth: self.lineswidth.unwrap_or(defaults.lineswidth),
            opacity: self.opacity.unwrap_or(defaults.opacity),
        }
    }
}

/// Every derived buffer of a scene object
///
/// `None` means the kind is hidden or does not apply to the geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectBuffers {
    pub points: Option<PointBuffer>,
    pub lines: Option<LineBuffer>,
    pub front_faces: Option<FaceBuffer>,
    pub back_faces: Option<FaceBuffer>,
    pub text: Option<TextBuffer>,
    /// Number of successful builds so far; 0 before the first `init`
    pub generation: u64,
}

impl ObjectBuffers {
    /// Build every buffer of `geometry`, leaving `generation` at 0
    pub fn build(
        geometry: &Geometry,
        appearance: &Appearance,
        glyphs: &dyn GlyphRasterizer,
    ) -> Result<Self> {
        let buffers = match geometry {
            Geometry::Mesh(mesh) => {
                let mesh = mesh.as_ref();
                Self {
                    points: mesh_points(mesh, appearance)?,
                    lines: mesh_lines(mesh, appearance)?,
                    front_faces: mesh_faces(mesh, appearance, FaceSide::Front)?,
                    back_faces: mesh_faces(mesh, appearance, FaceSide::Back)?,
                    ..Self::default()
                }
            }
            Geometry::Network(network) => {
                let network = network.as_ref();
                Self {
                    points: network_points(network, appearance)?,
                    lines: network_lines(network, appearance)?,
                    ..Self::default()
                }
            }
            Geometry::Point(point) => Self {
                points: point_buffer(&[*point], appearance),
                ..Self::default()
            },
            Geometry::Line(line) => Self {
                points: point_buffer(&[line.start, line.end], appearance),
                lines: line_buffer(&[*line], appearance),
                ..Self::default()
            },
            Geometry::Vector { vector, anchor } => {
                let tip = anchor + vector;
                Self {
                    points: point_buffer(&[tip], appearance),
                    lines: line_buffer(&[Line::new(*anchor, tip)], appearance),
                    ..Self::default()
                }
            }
            Geometry::Grid(grid) => Self {
                lines: grid_lines(grid, appearance),
                ..Self::default()
            },
            Geometry::Tag(tag) => Self {
                text: Some(build_text_buffer(tag, glyphs)?),
                ..Self::default()
            },
        };
        Ok(buffers)
    }

    /// Every built buffer passes its own validation
    pub fn validate(&self) -> Result<()> {
        if let Some(points) = &self.points {
            points.validate()?;
        }
        if let Some(lines) = &self.lines {
            lines.validate()?;
        }
        if let Some(faces) = &self.front_faces {
            faces.validate()?;
        }
        if let Some(faces) = &self.back_faces {
            faces.validate()?;
        }
        if let Some(text) = &self.text {
            text.anchor.validate()?;
        }
        Ok(())
    }
}

/// A geometry added to a scene, with its appearance, transform and buffers
#[derive(Debug, Clone)]
pub struct SceneObject {
    id: ObjectId,
    name: String,
    geometry: Geometry,
    appearance: Appearance,
    transform: ObjectTransform,
    matrix: Matrix4<f32>,
    buffers: ObjectBuffers,
}

impl SceneObject {
    /// Create an object without buffers; call [`SceneObject::init`] to build them
    pub fn new(
        id: ObjectId,
        geometry: impl Into<Geometry>,
        options: ObjectOptions,
        config: &SceneConfig,
    ) -> Self {
        let geometry = geometry.into();
        let appearance = options.appearance(&geometry, config);
        let name = options
            .name
            .clone()
            .unwrap_or_else(|| format!("{} {}", geometry.kind_name(), id));
        Self {
            id,
            name,
            geometry,
            appearance,
            transform: options.transform,
            matrix: options.transform.matrix(),
            buffers: ObjectBuffers::default(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Changes take effect on the next `init` or `update`
    pub fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }

    pub fn transform(&self) -> &ObjectTransform {
        &self.transform
    }

    /// The new transform takes effect on the next `update`
    pub fn set_transform(&mut self, transform: ObjectTransform) {
        self.transform = transform;
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        self.matrix
    }

    pub fn buffers(&self) -> &ObjectBuffers {
        &self.buffers
    }

    pub fn is_initialized(&self) -> bool {
        self.buffers.generation > 0
    }

    /// Rebuild every buffer from the current geometry and appearance
    ///
    /// On failure the previous buffers are kept untouched.
    pub fn init(&mut self, glyphs: &dyn GlyphRasterizer) -> Result<()> {
        let mut buffers = ObjectBuffers::build(&self.geometry, &self.appearance, glyphs)?;
        buffers.generation = self.buffers.generation + 1;
        debug!(
            "Built buffers for {} ({}): {} points, {} lines, {} front and {} back triangles",
            self.name,
            self.geometry.kind_name(),
            buffers.points.as_ref().map_or(0, |b| b.element_count()),
            buffers.lines.as_ref().map_or(0, |b| b.element_count()),
            buffers.front_faces.as_ref().map_or(0, |b| b.element_count()),
            buffers.back_faces.as_ref().map_or(0, |b| b.element_count()),
        );
        self.buffers = buffers;
        Ok(())
    }

    /// Rebuild the buffers, then adopt the current transform matrix
    ///
    /// A failed rebuild leaves both the buffers and the matrix as they were.
    pub fn update(&mut self, glyphs: &dyn GlyphRasterizer) -> Result<()> {
        let matrix = self.transform.matrix();
        self.init(glyphs)?;
        self.matrix = matrix;
        Ok(())
    }

    fn params<'a>(&'a self, primitive: Primitive<'a>) -> DrawParams<'a> {
        DrawParams {
            object: self.id,
            generation: self.buffers.generation,
            transform: self.matrix,
            opacity: self.appearance.opacity,
            primitive,
        }
    }

    /// Issue draw calls for every built buffer
    ///
    /// Faces go first (front, then back), then lines, then points, then text.
    pub fn draw(&self, renderer: &mut dyn Renderer, camera_position: &Point3f) -> Result<()> {
        if let Some(buffer) = &self.buffers.front_faces {
            renderer.draw(&self.params(Primitive::Faces {
                buffer,
                side: FaceSide::Front,
            }))?;
        }
        if let Some(buffer) = &self.buffers.back_faces {
            renderer.draw(&self.params(Primitive::Faces {
                buffer,
                side: FaceSide::Back,
            }))?;
        }
        if let Some(buffer) = &self.buffers.lines {
            renderer.draw(&self.params(Primitive::Lines {
                buffer,
                width: self.appearance.lineswidth,
            }))?;
        }
        if let Some(buffer) = &self.buffers.points {
            renderer.draw(&self.params(Primitive::Points {
                buffer,
                size: self.appearance.pointssize,
            }))?;
        }
        if let Some(params) = self.text_draw_params(camera_position) {
            renderer.draw_text(&params)?;
        }
        Ok(())
    }

    /// Draw parameters of a tag for a camera at `camera_position`
    ///
    /// `None` for other geometry kinds and before the first `init`.
    pub fn text_draw_params(&self, camera_position: &Point3f) -> Option<TextDrawParams<'_>> {
        let Geometry::Tag(tag) = &self.geometry else {
            return None;
        };
        let text = self.buffers.text.as_ref()?;
        Some(TextDrawParams {
            object: self.id,
            generation: self.buffers.generation,
            transform: self.matrix,
            opacity: self.appearance.opacity,
            text_height: tag.text_height(camera_position),
            text_num: tag.char_count(),
            text_color: tag.color(),
            texture: &text.texture,
            anchor: &text.anchor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FallbackGlyphs;
    use approx::assert_relative_eq;
    use meshview_core::{Color, Error};

    fn square() -> PolygonMesh {
        PolygonMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3]],
        )
        .unwrap()
    }

    fn object(geometry: impl Into<Geometry>, options: ObjectOptions) -> SceneObject {
        SceneObject::new(ObjectId(1), geometry, options, &SceneConfig::default())
    }

    #[test]
    fn test_buffers_are_built_on_init_only() {
        let mut object = object(square(), ObjectOptions::default());
        assert!(!object.is_initialized());
        assert!(object.buffers().front_faces.is_none());

        object.init(&FallbackGlyphs).unwrap();
        let buffers = object.buffers();
        assert_eq!(buffers.generation, 1);
        assert!(buffers.points.is_none());
        assert_eq!(buffers.lines.as_ref().unwrap().element_count(), 4);
        assert_eq!(buffers.front_faces.as_ref().unwrap().element_count(), 2);
        assert_eq!(buffers.back_faces.as_ref().unwrap().element_count(), 2);
        assert!(buffers.text.is_none());
        buffers.validate().unwrap();
    }

    #[test]
    fn test_options_override_config() {
        let options = ObjectOptions {
            show_points: Some(true),
            show_faces: Some(false),
            facescolor: Some(ColorMap::new(Color::red())),
            opacity: Some(0.25),
            name: Some("plate".to_string()),
            ..ObjectOptions::default()
        };
        let object = object(square(), options);
        let appearance = object.appearance();
        assert!(appearance.show_points);
        assert!(!appearance.show_faces);
        assert!(appearance.show_lines);
        assert_eq!(appearance.facescolor.default_color(), Color::red());
        assert_eq!(appearance.opacity, 0.25);
        assert_eq!(object.name(), "plate");
    }

    #[test]
    fn test_networks_show_nodes_unless_told_otherwise() {
        let network = Network::from_nodes_and_edges(
            vec![Point3f::origin(), Point3f::new(1.0, 0.0, 0.0)],
            vec![(0, 1)],
        )
        .unwrap();

        let mut shown = object(network.clone(), ObjectOptions::default());
        shown.init(&FallbackGlyphs).unwrap();
        assert_eq!(shown.buffers().points.as_ref().unwrap().element_count(), 2);

        let hidden_options = ObjectOptions {
            show_points: Some(false),
            ..ObjectOptions::default()
        };
        let mut hidden = object(network, hidden_options);
        hidden.init(&FallbackGlyphs).unwrap();
        assert!(hidden.buffers().points.is_none());
        assert_eq!(hidden.buffers().lines.as_ref().unwrap().element_count(), 1);
    }

    #[test]
    fn test_primitive_kinds() {
        let mut point = object(Point3f::new(1.0, 2.0, 3.0), ObjectOptions::default());
        point.init(&FallbackGlyphs).unwrap();
        let points = point.buffers().points.as_ref().unwrap();
        assert_eq!(points.positions, vec![Point3f::new(1.0, 2.0, 3.0)]);

        let segment = Line::new(Point3f::origin(), Point3f::new(0.0, 0.0, 2.0));
        let mut line = object(segment, ObjectOptions::default());
        line.init(&FallbackGlyphs).unwrap();
        assert_eq!(line.buffers().lines.as_ref().unwrap().elements, vec![[0, 1]]);
        assert!(line.buffers().points.is_none());

        let geometry = Geometry::Vector {
            vector: Vector3f::new(0.0, 1.0, 0.0),
            anchor: Point3f::new(1.0, 0.0, 0.0),
        };
        let options = ObjectOptions {
            show_points: Some(true),
            ..ObjectOptions::default()
        };
        let mut vector = object(geometry, options);
        vector.init(&FallbackGlyphs).unwrap();
        let buffers = vector.buffers();
        assert_eq!(
            buffers.lines.as_ref().unwrap().positions,
            vec![Point3f::new(1.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 0.0)]
        );
        assert_eq!(buffers.points.as_ref().unwrap().positions, vec![Point3f::new(1.0, 1.0, 0.0)]);

        let mut grid = object(Grid::new(1.0, 2, 1.0, 3), ObjectOptions::default());
        grid.init(&FallbackGlyphs).unwrap();
        assert_eq!(grid.buffers().lines.as_ref().unwrap().element_count(), 7);
    }

    struct NoFont;

    impl GlyphRasterizer for NoFont {
        fn rasterize(
            &self,
            font: &std::path::Path,
            _ch: char,
            _pixel_size: u32,
        ) -> Result<crate::text::GlyphBitmap> {
            Err(Error::Font(format!("cannot open {}", font.display())))
        }
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_buffers() {
        let mut tag = object(Tag::new("hi", Point3f::origin()), ObjectOptions::default());
        tag.init(&FallbackGlyphs).unwrap();
        let before = tag.buffers().clone();

        assert!(tag.init(&NoFont).is_err());
        assert_eq!(tag.buffers(), &before);
        assert_eq!(tag.buffers().generation, 1);
    }

    #[test]
    fn test_update_recomputes_matrix() {
        let mut object = object(square(), ObjectOptions::default());
        object.init(&FallbackGlyphs).unwrap();
        assert_eq!(object.matrix(), Matrix4::identity());

        object.set_transform(ObjectTransform {
            translation: Vector3f::new(1.0, 2.0, 3.0),
            scale: Vector3f::new(2.0, 2.0, 2.0),
            ..ObjectTransform::default()
        });
        assert_eq!(object.matrix(), Matrix4::identity());

        object.update(&FallbackGlyphs).unwrap();
        assert_eq!(object.buffers().generation, 2);
        let moved = Transform3D::from(object.matrix()).transform_point(&Point3f::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved, Point3f::new(3.0, 2.0, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_failed_update_keeps_previous_matrix() {
        let mut tag = object(Tag::new("hi", Point3f::origin()), ObjectOptions::default());
        tag.init(&FallbackGlyphs).unwrap();

        tag.set_transform(ObjectTransform {
            translation: Vector3f::new(0.0, 0.0, 5.0),
            ..ObjectTransform::default()
        });
        assert!(tag.update(&NoFont).is_err());
        assert_eq!(tag.matrix(), Matrix4::identity());
        assert_eq!(tag.buffers().generation, 1);

        tag.update(&FallbackGlyphs).unwrap();
        assert_eq!(tag.matrix()[(2, 3)], 5.0);
    }

    #[test]
    fn test_text_draw_params() {
        let tag = Tag::new("hello", Point3f::origin())
            .with_color(Color::green())
            .with_height(20.0)
            .with_absolute_height(true);
        let mut object = object(tag, ObjectOptions::default());
        assert!(object.text_draw_params(&Point3f::new(0.0, 0.0, 4.0)).is_none());

        object.init(&FallbackGlyphs).unwrap();
        let params = object.text_draw_params(&Point3f::new(0.0, 0.0, 4.0)).unwrap();
        assert_eq!(params.text_height, 50);
        assert_eq!(params.text_num, 5);
        assert_eq!(params.text_color, Color::green());
        assert_eq!(params.texture.width, 240);
        assert_eq!(params.anchor.elements, vec![[0]]);
    }
}
