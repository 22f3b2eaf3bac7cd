//! The player character

use std::sync::Arc;

use scene_engine::foundation::math::Vec3;
use scene_engine::physics::PhysicsBody;
use scene_engine::render::Mesh;
use scene_engine::scene::Object;

use super::impl_entity;

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    object: Object,
    pbody_size: Vec3,
    speed: f32,
    velocity: Vec3,
}

impl Player {
    /// Wrap an existing object
    pub fn new(object: Object) -> Self {
        Self {
            object,
            pbody_size: Vec3::new(1.0, 2.0, 1.0),
            speed: 25.0,
            velocity: Vec3::zeros(),
        }
    }

    /// Player with the stock orientation and a hidden physics body
    pub fn generate_default(scene: &str, mesh_path: &str, mesh: Arc<Mesh>) -> Self {
        let mut player = Self::new(Object::with_mesh("player", scene, mesh_path, mesh));
        player.object.set_rotation(Vec3::new(90.0, 0.0, 180.0));
        let mut body = PhysicsBody::new_box(Vec3::zeros(), player.pbody_size);
        body.set_local_position(Vec3::new(0.0, 0.0, 1.0));
        body.set_visible(false);
        player.object.add_physics_body(body);
        player
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

    /// Movement speed in units per second
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set movement speed; negative values clamp to zero
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    /// Steer in `direction` at full speed; a zero vector stops the player
    pub fn set_move_direction(&mut self, direction: Vec3) {
        self.velocity = direction.try_normalize(f32::EPSILON).map_or_else(Vec3::zeros, |d| d * self.speed);
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn tick(&mut self, delta_time: f32) {
        self.object.update(delta_time);
        let position = self.object.position() + self.velocity * delta_time;
        self.object.set_position(position);
    }
}

impl_entity!(Player);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scene_engine::scene::Entity;

    #[test]
    fn test_generate_default() {
        let player = Player::generate_default("level", "hero.obj", Arc::new(Mesh::cuboid(Vec3::new(1.0, 1.0, 1.0))));
        assert_eq!(player.object().rotation(), Vec3::new(90.0, 0.0, 180.0));
        assert_eq!(player.object().physics_bodies().len(), 1);
        assert!(!player.object().physics_bodies()[0].is_visible());
    }

    #[test]
    fn test_movement() {
        let mut player = Player::new(Object::new("player", "level"));
        player.set_speed(2.0);
        player.set_move_direction(Vec3::new(3.0, 0.0, 0.0));
        player.update(0.5);
        assert_relative_eq!(player.object().position(), Vec3::new(1.0, 0.0, 0.0));

        player.set_move_direction(Vec3::zeros());
        player.update(0.5);
        assert_relative_eq!(player.object().position(), Vec3::new(1.0, 0.0, 0.0));
    }
}
