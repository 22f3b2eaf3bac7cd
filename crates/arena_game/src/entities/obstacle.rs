//! Static level props

use std::sync::Arc;

use scene_engine::foundation::math::Vec3;
use scene_engine::render::Mesh;
use scene_engine::scene::{Object, ObjectFlags};

use super::impl_entity;

/// Physics body size used when a prop gives none
pub fn default_pbody_size() -> Vec3 {
    Vec3::new(4.0, 4.0, 4.0)
}

/// A static, collidable prop placed from level data
#[derive(Debug, Clone)]
pub struct Obstacle {
    object: Object,
    pbody_size: Vec3,
}

impl Obstacle {
    /// Wrap an existing object
    pub fn new(object: Object) -> Self {
        Self {
            object,
            pbody_size: default_pbody_size(),
        }
    }

    /// Obstacle displaying `mesh`
    pub fn from_mesh(name: &str, scene: &str, mesh_path: &str, mesh: Arc<Mesh>) -> Self {
        Self::new(Object::with_mesh(name, scene, mesh_path, mesh))
    }

    /// Underlying object
    pub fn object(&self) -> &Object {
        &self.object
    }

    /// Underlying object, mutably
    pub fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }

    /// Physics body size hint
    pub fn pbody_size(&self) -> Vec3 {
        self.pbody_size
    }

    /// Set the physics body size hint
    pub fn set_pbody_size(&mut self, size: Vec3) {
        self.pbody_size = size;
    }

    /// Whether physics bodies are debug-drawn
    pub fn draw_pbody(&self) -> bool {
        self.object.flags().contains(ObjectFlags::DRAW_BODIES)
    }

    /// Debug-draw physics bodies or not; applies to every attached body
    pub fn set_draw_pbody(&mut self, draw: bool) {
        self.object.set_flags(ObjectFlags::DRAW_BODIES, draw);
        for index in 0..self.object.physics_bodies().len() {
            if let Some(body) = self.object.physics_body_mut(index) {
                body.set_visible(draw);
            }
        }
    }

    /// Clear placement so the obstacle can be placed again
    pub fn reset_placement(&mut self) {
        self.object.reset_transform();
        self.object.clear_physics_bodies();
    }

    fn tick(&mut self, delta_time: f32) {
        self.object.update(delta_time);
    }
}

impl_entity!(Obstacle);
