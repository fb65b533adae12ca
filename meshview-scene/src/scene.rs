//! The scene: an ordered collection of scene objects

use crate::camera::Camera;
use crate::config::SceneConfig;
use crate::draw::Renderer;
use crate::object::{Geometry, ObjectId, ObjectOptions, SceneObject};
use crate::text::{FallbackGlyphs, GlyphRasterizer};
use meshview_core::{Error, Result};
use std::collections::BTreeMap;
use tracing::info;

/// Scene objects keyed by id, drawn in the order they were added
pub struct Scene {
    config: SceneConfig,
    objects: BTreeMap<ObjectId, SceneObject>,
    next_id: u64,
    glyphs: Box<dyn GlyphRasterizer + Send + Sync>,
}

impl Scene {
    pub fn new(config: SceneConfig, glyphs: Box<dyn GlyphRasterizer + Send + Sync>) -> Self {
        Self {
            config,
            objects: BTreeMap::new(),
            next_id: 1,
            glyphs,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Add a geometry and return the id of its new object
    ///
    /// Buffers are not built until [`Scene::init`] or [`Scene::update`].
    pub fn add(&mut self, geometry: impl Into<Geometry>, options: ObjectOptions) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        let object = SceneObject::new(id, geometry, options, &self.config);
        info!("Added {} as {}", object.name(), id);
        self.objects.insert(id, object);
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let removed = self.objects.remove(&id);
        if let Some(object) = &removed {
            info!("Removed {} ({})", object.name(), id);
        }
        removed
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// Objects in insertion order
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Build the buffers of every object
    pub fn init(&mut self) -> Result<()> {
        let glyphs = self.glyphs.as_ref();
        for object in self.objects.values_mut() {
            object.init(glyphs)?;
        }
        Ok(())
    }

    /// Rebuild the buffers of one object
    pub fn init_object(&mut self, id: ObjectId) -> Result<()> {
        let object = self.objects.get_mut(&id).ok_or_else(|| unknown(id))?;
        object.init(self.glyphs.as_ref())
    }

    /// Recompute one object's transform and rebuild its buffers
    pub fn update(&mut self, id: ObjectId) -> Result<()> {
        let object = self.objects.get_mut(&id).ok_or_else(|| unknown(id))?;
        object.update(self.glyphs.as_ref())
    }

    /// Draw every object in insertion order
    pub fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera) -> Result<()> {
        for object in self.objects.values() {
            object.draw(renderer, &camera.position)?;
        }
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default(), Box::new(FallbackGlyphs))
    }
}

fn unknown(id: ObjectId) -> Error {
    Error::InvalidData(format!("no scene object {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Tag;
    use meshview_core::Point3f;

    #[test]
    fn test_ids_are_never_reused() {
        let mut scene = Scene::default();
        let a = scene.add(Point3f::origin(), ObjectOptions::default());
        let b = scene.add(Point3f::origin(), ObjectOptions::default());
        assert!(b > a);

        assert!(scene.remove(b).is_some());
        assert!(scene.remove(b).is_none());
        let c = scene.add(Point3f::origin(), ObjectOptions::default());
        assert!(c > b);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_init_and_update() {
        let mut scene = Scene::default();
        let id = scene.add(Point3f::new(1.0, 0.0, 0.0), ObjectOptions::default());
        assert!(!scene.get(id).unwrap().is_initialized());

        scene.init().unwrap();
        assert_eq!(scene.get(id).unwrap().buffers().generation, 1);

        scene.update(id).unwrap();
        assert_eq!(scene.get(id).unwrap().buffers().generation, 2);

        scene.remove(id);
        assert!(scene.update(id).is_err());
    }

    #[test]
    fn test_tags_use_the_scene_rasterizer() {
        let mut scene = Scene::default();
        let id = scene.add(Tag::new("abc", Point3f::origin()), ObjectOptions::default());
        scene.init_object(id).unwrap();
        let text = scene.get(id).unwrap().buffers().text.as_ref().unwrap();
        assert_eq!(text.texture.width, 144);
    }
}
