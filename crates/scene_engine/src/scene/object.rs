//! Scene objects
//!
//! [`Object`] is the placeable unit every game entity is built on: a
//! transform, an optional shared mesh, a material, physics bodies and an
//! animation manager. Game crates add their own kinds through [`Entity`].

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use bitflags::bitflags;

use crate::animation::{Animation, AnimationError, AnimationManager};
use crate::foundation::math::{Transform, Vec3};
use crate::physics::PhysicsBody;
use crate::render::{Material, Mesh};

bitflags! {
    /// Per-object render and debug switches
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u8 {
        /// Drawn by the renderer
        const VISIBLE = 1 << 0;
        /// Rendered into the shadow pass
        const CAST_SHADOWS = 1 << 1;
        /// Physics bodies are drawn for debugging
        const DRAW_BODIES = 1 << 2;
    }
}

impl Default for ObjectFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::CAST_SHADOWS
    }
}

/// A positioned object in a scene
///
/// Cloning produces an independent copy: transform, material, bodies and
/// animations are duplicated, only the immutable mesh data is shared.
#[derive(Debug, Clone)]
pub struct Object {
    name: String,
    scene: String,
    transform: Transform,
    mesh_path: Option<String>,
    mesh: Option<Arc<Mesh>>,
    material: Material,
    bodies: Vec<PhysicsBody>,
    animations: AnimationManager,
    flags: ObjectFlags,
}

impl Object {
    /// Create an object with no mesh
    pub fn new(name: impl Into<String>, scene: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scene: scene.into(),
            transform: Transform::default(),
            mesh_path: None,
            mesh: None,
            material: Material::new(),
            bodies: Vec::new(),
            animations: AnimationManager::new(),
            flags: ObjectFlags::default(),
        }
    }

    /// Create an object displaying `mesh`
    pub fn with_mesh(
        name: impl Into<String>,
        scene: impl Into<String>,
        mesh_path: impl Into<String>,
        mesh: Arc<Mesh>,
    ) -> Self {
        let mut object = Self::new(name, scene);
        object.set_mesh(mesh_path, mesh);
        object
    }

    /// Object name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the object
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Name of the scene that owns this object
    pub fn scene_name(&self) -> &str {
        &self.scene
    }

    /// Move the object to another scene's bookkeeping
    pub fn set_scene_name(&mut self, scene: impl Into<String>) {
        self.scene = scene.into();
    }

    /// Full transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Set world position
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Euler rotation in degrees
    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation
    }

    /// Set the Euler rotation in degrees
    pub fn set_rotation(&mut self, degrees: Vec3) {
        self.transform.rotation = degrees;
    }

    /// Scale factors
    pub fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    /// Set the scale factors
    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }

    /// Reset position, rotation and scale
    pub fn reset_transform(&mut self) {
        self.transform = Transform::default();
    }

    /// Displayed mesh
    pub fn mesh(&self) -> Option<&Arc<Mesh>> {
        self.mesh.as_ref()
    }

    /// Path the mesh was loaded from
    pub fn mesh_path(&self) -> Option<&str> {
        self.mesh_path.as_deref()
    }

    /// Replace the displayed mesh
    pub fn set_mesh(&mut self, path: impl Into<String>, mesh: Arc<Mesh>) {
        self.mesh_path = Some(path.into());
        self.mesh = Some(mesh);
    }

    /// Minimum corner of the mesh bounds, or the origin without a mesh
    pub fn mesh_min(&self) -> Vec3 {
        self.mesh.as_ref().map_or_else(Vec3::zeros, |m| m.min())
    }

    /// Maximum corner of the mesh bounds, or the origin without a mesh
    pub fn mesh_max(&self) -> Vec3 {
        self.mesh.as_ref().map_or_else(Vec3::zeros, |m| m.max())
    }

    /// Size of the mesh bounds
    pub fn mesh_extents(&self) -> Vec3 {
        self.mesh_max() - self.mesh_min()
    }

    /// Material
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Mutable material
    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    /// Replace the material
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Attach a physics body and return its index
    pub fn add_physics_body(&mut self, body: PhysicsBody) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Attached physics bodies
    pub fn physics_bodies(&self) -> &[PhysicsBody] {
        &self.bodies
    }

    /// Mutable physics body by index
    pub fn physics_body_mut(&mut self, index: usize) -> Option<&mut PhysicsBody> {
        self.bodies.get_mut(index)
    }

    /// Detach every physics body
    pub fn clear_physics_bodies(&mut self) {
        self.bodies.clear();
    }

    /// Animations
    pub fn animation_manager(&self) -> &AnimationManager {
        &self.animations
    }

    /// Mutable animations
    pub fn animation_manager_mut(&mut self) -> &mut AnimationManager {
        &mut self.animations
    }

    /// Add an animation bound to this object's mesh
    pub fn add_animation(&mut self, animation: Box<dyn Animation>, make_current: bool) -> Result<usize, AnimationError> {
        if let Some(mesh) = &self.mesh {
            if self.animations.vertex_count() != Some(mesh.vertex_count()) {
                self.animations.set_vertex_count(mesh.vertex_count())?;
            }
        }
        self.animations.add_animation(animation, make_current)
    }

    /// Render and debug flags
    pub fn flags(&self) -> ObjectFlags {
        self.flags
    }

    /// Turn flags on or off
    pub fn set_flags(&mut self, flags: ObjectFlags, enabled: bool) {
        self.flags.set(flags, enabled);
    }

    /// Whether the renderer draws this object
    pub fn is_visible(&self) -> bool {
        self.flags.contains(ObjectFlags::VISIBLE)
    }

    /// Show or hide the object
    pub fn set_visible(&mut self, visible: bool) {
        self.flags.set(ObjectFlags::VISIBLE, visible);
    }

    /// Advance animations
    pub fn update(&mut self, delta_time: f32) {
        self.animations.update(delta_time);
    }
}

/// Anything that can live in an object list
pub trait Entity: Debug + Any {
    /// Underlying object
    fn object(&self) -> &Object;

    /// Underlying object, mutably
    fn object_mut(&mut self) -> &mut Object;

    /// Per-frame update
    fn update(&mut self, delta_time: f32) {
        self.object_mut().update(delta_time);
    }

    /// Deep copy behind a fresh box
    fn clone_entity(&self) -> Box<dyn Entity>;

    /// Downcast support
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl Clone for Box<dyn Entity> {
    fn clone(&self) -> Self {
        self.clone_entity()
    }
}

impl Entity for Object {
    fn object(&self) -> &Object {
        self
    }

    fn object_mut(&mut self) -> &mut Object {
        self
    }

    fn clone_entity(&self) -> Box<dyn Entity> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{MorphAnimation, MorphAnimationFrame};

    #[test]
    fn test_clone_is_independent() {
        let mesh = Arc::new(Mesh::cuboid(Vec3::new(1.0, 1.0, 1.0)));
        let mut original = Object::with_mesh("crate", "level", "crate.obj", mesh);
        original.add_physics_body(PhysicsBody::new_box(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)));

        let mut copy = original.clone();
        copy.set_position(Vec3::new(5.0, 0.0, 0.0));
        copy.clear_physics_bodies();
        copy.material_mut().set("a_EnabledLights", 1);

        assert_eq!(original.position(), Vec3::zeros());
        assert_eq!(original.physics_bodies().len(), 1);
        assert!(original.material().get("a_EnabledLights").is_none());
        assert!(Arc::ptr_eq(original.mesh().unwrap(), copy.mesh().unwrap()));
    }

    #[test]
    fn test_mesh_bounds_without_mesh() {
        let object = Object::new("empty", "level");
        assert_eq!(object.mesh_extents(), Vec3::zeros());
    }

    #[test]
    fn test_animation_bound_to_mesh_vertex_count() {
        let mesh = Arc::new(Mesh::cuboid(Vec3::new(1.0, 1.0, 1.0)));
        let mut object = Object::with_mesh("crate", "level", "crate.obj", mesh.clone());

        let mut good = MorphAnimation::new("pulse");
        good.add_frame(MorphAnimationFrame::from_mesh(&mesh, 1.0)).unwrap();
        assert!(object.add_animation(Box::new(good), false).is_ok());

        let mut bad = MorphAnimation::new("broken");
        bad.add_frame(MorphAnimationFrame::new(Vec::new(), 1.0)).unwrap();
        assert!(object.add_animation(Box::new(bad), false).is_err());
    }

    #[test]
    fn test_flags() {
        let mut object = Object::new("lamp", "level");
        assert!(object.is_visible());
        object.set_flags(ObjectFlags::DRAW_BODIES, true);
        object.set_visible(false);
        assert_eq!(object.flags(), ObjectFlags::CAST_SHADOWS | ObjectFlags::DRAW_BODIES);
    }
}
