//! Engine context
//!
//! Owns every registry a running game touches: the scene manager, the
//! per-scene object and light lists, and the mesh cache. Several contexts can
//! live side by side; nothing here is global.

use crate::animation::AnimationError;
use crate::assets::{AssetError, MeshCache, MeshSource};
use crate::config::ConfigError;
use crate::core::config::ApplicationConfig;
use crate::lighting::LightManager;
use crate::scene::{SceneError, SceneLists, SceneManager};

/// Engine-level errors
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Scene registry error
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Asset loading error
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Animation error
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),
}

/// All engine state for one running game
#[derive(Debug)]
pub struct EngineContext {
    /// Configuration the context was built from
    pub config: ApplicationConfig,
    /// Named scenes
    pub scenes: SceneManager,
    /// Per-scene object and light lists
    pub lists: SceneLists,
    /// Shared meshes
    pub meshes: MeshCache,
    frame: u64,
}

impl EngineContext {
    /// Context reading meshes from the configured asset directory
    pub fn new(config: ApplicationConfig) -> Self {
        let meshes = MeshCache::from_config(&config.assets);
        Self::with_mesh_cache(config, meshes)
    }

    /// Context reading meshes from `source`
    pub fn with_mesh_source(config: ApplicationConfig, source: Box<dyn MeshSource>) -> Self {
        Self::with_mesh_cache(config, MeshCache::new(source))
    }

    fn with_mesh_cache(config: ApplicationConfig, meshes: MeshCache) -> Self {
        log::info!("Creating engine context for '{}'", config.application_name);
        Self {
            lists: SceneLists::new(LightManager::new(config.lighting.clone())),
            scenes: SceneManager::new(),
            meshes,
            config,
            frame: 0,
        }
    }

    /// Validate the configuration and build a context from it
    pub fn try_new(config: ApplicationConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        Ok(Self::new(config))
    }

    /// Switch the current scene
    pub fn set_current_scene(&mut self, name: &str) -> bool {
        self.scenes.set_current_scene(name, &mut self.lists)
    }

    /// Name of the current scene
    pub fn current_scene_name(&self) -> Option<&str> {
        self.scenes.current_name()
    }

    /// Frames stepped so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Step the current scene by `delta_time` seconds
    ///
    /// Runs the scene callback, updates every object in the scene's object
    /// list, then refreshes materials and post shaders from its light list.
    pub fn update(&mut self, delta_time: f32) {
        self.frame += 1;
        let Some(name) = self.scenes.current_name().map(str::to_string) else {
            return;
        };
        self.scenes.update_current(&mut self.lists, delta_time);

        let mut objects = self.lists.objects.get_scene_object_list_by_name_mut(&name);
        if let Some(list) = objects.as_deref_mut() {
            list.update(delta_time);
        }
        if let Some(lights) = self.lists.lights.get_scene_light_list_by_name(&name) {
            lights.update(delta_time, objects);
        }
    }

    /// Drop every scene; object and light lists are kept
    pub fn destroy_scenes(&mut self) {
        self.scenes.destroy_scenes();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::InMemoryMeshSource;
    use crate::foundation::math::Vec3;
    use crate::lighting::Light;
    use crate::render::UniformValue;
    use crate::scene::{Object, Scene};

    #[derive(Debug)]
    struct ListsScene;

    impl Scene for ListsScene {
        fn on_open(&mut self, name: &str, lists: &mut SceneLists) {
            lists.objects.create_scene_object_list(name);
            lists.lights.create_scene_light_list(name);
        }

        fn on_close(&mut self, name: &str, lists: &mut SceneLists) {
            lists.objects.destroy_scene_object_list_by_name(name);
            lists.lights.destroy_scene_light_list_by_name(name);
        }
    }

    fn context() -> EngineContext {
        EngineContext::with_mesh_source(ApplicationConfig::default(), Box::new(InMemoryMeshSource::new()))
    }

    #[test]
    fn test_update_without_scene_is_noop() {
        let mut engine = context();
        engine.update(0.1);
        assert_eq!(engine.frame(), 1);
    }

    #[test]
    fn test_update_lights_current_scene_objects() {
        let mut engine = context();
        engine.scenes.register_scene("level", Some(Box::new(ListsScene))).unwrap();
        assert!(engine.set_current_scene("level"));

        let id = engine
            .lists
            .objects
            .add_object_to_scene_object_list(Box::new(Object::new("crate", "level")), false)
            .unwrap();
        engine.lists.lights.add_light_to_scene_light_list(Light::point("level", Vec3::zeros()), false);
        engine.update(1.0 / 60.0);

        let list = engine.lists.objects.get_scene_object_list_by_name("level").unwrap();
        let material = list.get(id).unwrap().object().material();
        assert_eq!(material.get("a_EnabledLights").and_then(UniformValue::as_int), Some(1));
    }

    #[test]
    fn test_scene_switch_tears_down_lists() {
        let mut engine = context();
        engine.scenes.register_scene("a", Some(Box::new(ListsScene))).unwrap();
        engine.scenes.register_scene("b", Some(Box::new(ListsScene))).unwrap();
        engine.set_current_scene("a");
        engine.set_current_scene("b");
        assert!(!engine.lists.objects.scene_object_list_exists("a"));
        assert!(engine.lists.lights.scene_light_list_exists("b"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ApplicationConfig::new("");
        assert!(matches!(EngineContext::try_new(config), Err(EngineError::InvalidConfig(_))));
    }
}
