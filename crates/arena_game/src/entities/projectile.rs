//! Projectiles with a limited lifetime

use std::sync::Arc;

use scene_engine::foundation::math::Vec3;
use scene_engine::render::Mesh;
use scene_engine::scene::Object;

use super::impl_entity;

/// A moving projectile that expires after its maximum lifetime
///
/// A maximum lifetime of zero means the projectile never expires.
#[derive(Debug, Clone)]
pub struct Projectile {
    object: Object,
    pbody_size: Vec3,
    velocity: Vec3,
    age: f32,
    max_lifetime: f32,
    emissive_color: Vec3,
    emissive_power: f32,
}

impl Projectile {
    /// Wrap an existing object
    pub fn new(object: Object) -> Self {
        Self {
            object,
            pbody_size: Vec3::new(1.0, 1.0, 1.0),
            velocity: Vec3::zeros(),
            age: 0.0,
            max_lifetime: 0.0,
            emissive_color: Vec3::zeros(),
            emissive_power: 0.0,
        }
    }

    /// Projectile displaying `mesh`
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

    /// Velocity in units per second
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Set the velocity
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Seconds since launch
    pub fn age(&self) -> f32 {
        self.age
    }

    /// Maximum lifetime in seconds
    pub fn max_lifetime(&self) -> f32 {
        self.max_lifetime
    }

    /// Set the maximum lifetime; negative values clamp to zero
    pub fn set_max_lifetime(&mut self, seconds: f32) {
        self.max_lifetime = seconds.max(0.0);
    }

    /// Whether the projectile has outlived its maximum lifetime
    pub fn is_expired(&self) -> bool {
        self.max_lifetime > 0.0 && self.age >= self.max_lifetime
    }

    /// Seconds until expiry, zero once expired
    pub fn remaining(&self) -> f32 {
        if self.max_lifetime <= 0.0 {
            return f32::INFINITY;
        }
        (self.max_lifetime - self.age).max(0.0)
    }

    /// Emissive color
    pub fn emissive_color(&self) -> Vec3 {
        self.emissive_color
    }

    /// Set the emissive color and write it into the material
    pub fn set_emissive_color(&mut self, color: Vec3) {
        self.emissive_color = color;
        self.object.material_mut().set("a_EmissiveColor", color);
    }

    /// Emissive strength
    pub fn emissive_power(&self) -> f32 {
        self.emissive_power
    }

    /// Set the emissive strength and write it into the material
    pub fn set_emissive_power(&mut self, power: f32) {
        self.emissive_power = power;
        self.object.material_mut().set("a_EmissivePower", power);
    }

    /// Restart the lifetime clock
    pub fn launch(&mut self, position: Vec3, velocity: Vec3) {
        self.object.set_position(position);
        self.velocity = velocity;
        self.age = 0.0;
    }

    fn tick(&mut self, delta_time: f32) {
        self.object.update(delta_time);
        if self.is_expired() {
            return;
        }
        self.age += delta_time;
        let position = self.object.position() + self.velocity * delta_time;
        self.object.set_position(position);
    }
}

impl_entity!(Projectile);
