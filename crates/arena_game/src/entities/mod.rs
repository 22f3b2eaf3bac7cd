//! Game entities
//!
//! Every entity wraps a [`scene_engine::scene::Object`] and adds its own
//! gameplay state on top.

pub mod enemy;
pub mod obstacle;
pub mod player;
pub mod projectile;

pub use enemy::{Enemy, EnemyState, EnemyType};
pub use obstacle::Obstacle;
pub use player::Player;
pub use projectile::Projectile;

/// Implements [`scene_engine::scene::Entity`] for a wrapper with an `object`
/// field and a `tick(&mut self, f32)` method, plus a scene-copy helper.
macro_rules! impl_entity {
    ($ty:ty) => {
        impl scene_engine::scene::Entity for $ty {
            fn object(&self) -> &scene_engine::scene::Object {
                &self.object
            }

            fn object_mut(&mut self) -> &mut scene_engine::scene::Object {
                &mut self.object
            }

            fn update(&mut self, delta_time: f32) {
                self.tick(delta_time);
            }

            fn clone_entity(&self) -> Box<dyn scene_engine::scene::Entity> {
                Box::new(self.clone())
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }
        }

        impl $ty {
            /// Deep copy owned by `scene`
            pub fn copy_to_scene(&self, scene: &str) -> Self {
                let mut copy = self.clone();
                copy.object.set_scene_name(scene);
                copy
            }
        }
    };
}

pub(crate) use impl_entity;
