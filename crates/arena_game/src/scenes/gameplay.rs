//! The scene a level is played in

use scene_engine::scene::{Scene, SceneLists};

use crate::entities::Projectile;

/// Owns the object and light lists of a level scene
///
/// Opening creates both lists, closing destroys them. Each frame expired
/// projectiles are removed from the scene.
#[derive(Debug, Default)]
pub struct GameplayScene {
    elapsed: f32,
    frames: u64,
    expired_projectiles: usize,
}

impl GameplayScene {
    /// Create a gameplay scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds spent as the current scene
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Frames run as the current scene
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Projectiles removed after expiring
    pub fn expired_projectiles(&self) -> usize {
        self.expired_projectiles
    }
}

impl Scene for GameplayScene {
    fn on_open(&mut self, name: &str, lists: &mut SceneLists) {
        log::info!("Opening gameplay scene '{name}'");
        if !lists.objects.scene_object_list_exists(name) {
            lists.objects.create_scene_object_list(name);
        }
        if !lists.lights.scene_light_list_exists(name) {
            lists.lights.create_scene_light_list(name);
        }
        self.elapsed = 0.0;
        self.frames = 0;
    }

    fn on_close(&mut self, name: &str, lists: &mut SceneLists) {
        log::info!("Closing gameplay scene '{name}' after {} frames", self.frames);
        lists.objects.destroy_scene_object_list_by_name(name);
        lists.lights.destroy_scene_light_list_by_name(name);
    }

    fn update(&mut self, name: &str, lists: &mut SceneLists, delta_time: f32) {
        self.elapsed += delta_time;
        self.frames += 1;

        let Some(objects) = lists.objects.get_scene_object_list_by_name_mut(name) else {
            return;
        };
        let expired: Vec<_> = objects
            .iter()
            .filter(|(_, entity)| {
                entity
                    .as_any()
                    .downcast_ref::<Projectile>()
                    .is_some_and(Projectile::is_expired)
            })
            .map(|(id, _)| id)
            .collect();
        for id in expired {
            objects.delete_object(id);
            self.expired_projectiles += 1;
        }
    }
}
