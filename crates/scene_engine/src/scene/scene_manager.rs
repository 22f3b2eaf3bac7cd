//! Scene Manager - registry of named scenes with one active scene
//!
//! Scenes are registered by unique name and never opened on registration.
//! Switching the current scene closes the old one and opens the new one;
//! each scene's callbacks receive the shared [`SceneLists`] so they can
//! create or tear down their per-scene object and light lists.

use std::fmt::Debug;

use crate::foundation::collections::NamedRegistry;
use crate::lighting::LightManager;
use super::object_manager::ObjectManager;

/// Scene errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A scene with this name is already registered
    #[error("Scene '{0}' is already registered")]
    DuplicateScene(String),

    /// No scene with this name is registered
    #[error("Scene '{0}' is not registered")]
    UnknownScene(String),
}

/// The per-scene registries scenes operate on
#[derive(Debug, Default)]
pub struct SceneLists {
    /// Object lists keyed by scene name
    pub objects: ObjectManager,
    /// Light lists keyed by scene name
    pub lights: LightManager,
}

impl SceneLists {
    /// Empty registries with the given light manager
    pub fn new(lights: LightManager) -> Self {
        Self {
            objects: ObjectManager::new(),
            lights,
        }
    }
}

/// Scene lifecycle callbacks
///
/// All methods default to doing nothing.
pub trait Scene: Debug {
    /// Called when the scene becomes current
    fn on_open(&mut self, _name: &str, _lists: &mut SceneLists) {}

    /// Called when another scene replaces this one as current
    fn on_close(&mut self, _name: &str, _lists: &mut SceneLists) {}

    /// Called once per frame while the scene is current
    fn update(&mut self, _name: &str, _lists: &mut SceneLists, _delta_time: f32) {}
}

/// Scene with no behavior, registered when no scene value is supplied
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyScene;

impl Scene for EmptyScene {}

/// Registry of named scenes
#[derive(Debug, Default)]
pub struct SceneManager {
    scenes: NamedRegistry<Box<dyn Scene>>,
    current: Option<String>,
}

impl SceneManager {
    /// Create an empty manager with no current scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `scene` under `name`, or an [`EmptyScene`] when `None`
    pub fn register_scene(&mut self, name: &str, scene: Option<Box<dyn Scene>>) -> Result<(), SceneError> {
        let scene = scene.unwrap_or_else(|| Box::new(EmptyScene));
        if self.scenes.insert(name, scene).is_err() {
            log::warn!("Scene '{name}' is already registered");
            return Err(SceneError::DuplicateScene(name.to_string()));
        }
        log::debug!("Registered scene '{name}'");
        Ok(())
    }

    /// Make `name` the current scene
    ///
    /// Returns `false` for an unregistered name. Selecting the current scene
    /// again does nothing.
    pub fn set_current_scene(&mut self, name: &str, lists: &mut SceneLists) -> bool {
        if !self.scenes.contains(name) {
            log::warn!("Cannot switch to unknown scene '{name}'");
            return false;
        }
        if self.current.as_deref() == Some(name) {
            return true;
        }

        if let Some(previous) = self.current.take() {
            if let Some(scene) = self.scenes.get_mut(&previous) {
                scene.on_close(&previous, lists);
            }
            log::info!("Closed scene '{previous}'");
        }

        self.current = Some(name.to_string());
        if let Some(scene) = self.scenes.get_mut(name) {
            scene.on_open(name, lists);
        }
        log::info!("Opened scene '{name}'");
        true
    }

    /// Run the current scene's per-frame callback
    pub fn update_current(&mut self, lists: &mut SceneLists, delta_time: f32) {
        let Some(name) = self.current.as_deref() else {
            return;
        };
        if let Some(scene) = self.scenes.get_mut(name) {
            scene.update(name, lists, delta_time);
        }
    }

    /// The current scene
    pub fn current(&self) -> Option<&dyn Scene> {
        self.current.as_deref().and_then(|name| self.get(name))
    }

    /// Name of the current scene
    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Whether `name` is registered
    pub fn has_scene(&self, name: &str) -> bool {
        self.scenes.contains(name)
    }

    /// Scene by name
    pub fn get(&self, name: &str) -> Option<&dyn Scene> {
        self.scenes.get(name).map(|s| &**s)
    }

    /// Mutable scene by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Scene + 'static)> {
        self.scenes.get_mut(name).map(|s| &mut **s)
    }

    /// Registered names in registration order
    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.scenes.names()
    }

    /// Number of registered scenes
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether no scene is registered
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Unregister a scene that is not current, without closing it
    pub fn remove_scene(&mut self, name: &str) -> Option<Box<dyn Scene>> {
        if self.current.as_deref() == Some(name) {
            log::warn!("Cannot remove current scene '{name}'");
            return None;
        }
        self.scenes.remove(name)
    }

    /// Drop every scene without closing any of them
    pub fn destroy_scenes(&mut self) {
        self.scenes.clear();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct RecordingScene {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Scene for RecordingScene {
        fn on_open(&mut self, name: &str, _lists: &mut SceneLists) {
            self.log.borrow_mut().push(format!("open {name}"));
        }

        fn on_close(&mut self, name: &str, _lists: &mut SceneLists) {
            self.log.borrow_mut().push(format!("close {name}"));
        }
    }

    fn recording(log: &Rc<RefCell<Vec<String>>>) -> Option<Box<dyn Scene>> {
        Some(Box::new(RecordingScene { log: log.clone() }))
    }

    #[test]
    fn test_duplicate_scene_rejected() {
        let mut scenes = SceneManager::new();
        scenes.register_scene("menu", None).unwrap();
        assert_eq!(
            scenes.register_scene("menu", None),
            Err(SceneError::DuplicateScene("menu".to_string()))
        );
        assert_eq!(scenes.len(), 1);
    }

    #[test]
    fn test_transitions_pair_open_and_close() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scenes = SceneManager::new();
        let mut lists = SceneLists::default();
        scenes.register_scene("a", recording(&log)).unwrap();
        scenes.register_scene("b", recording(&log)).unwrap();
        assert!(log.borrow().is_empty());

        assert!(scenes.set_current_scene("a", &mut lists));
        assert!(scenes.set_current_scene("a", &mut lists));
        assert!(scenes.set_current_scene("b", &mut lists));
        assert!(scenes.set_current_scene("a", &mut lists));

        assert_eq!(*log.borrow(), vec!["open a", "close a", "open b", "close b", "open a"]);
        assert_eq!(scenes.current_name(), Some("a"));
    }

    #[test]
    fn test_unknown_scene_keeps_current() {
        let mut scenes = SceneManager::new();
        let mut lists = SceneLists::default();
        scenes.register_scene("a", None).unwrap();
        scenes.set_current_scene("a", &mut lists);
        assert!(!scenes.set_current_scene("missing", &mut lists));
        assert_eq!(scenes.current_name(), Some("a"));
    }

    #[test]
    fn test_destroy_does_not_close() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scenes = SceneManager::new();
        let mut lists = SceneLists::default();
        scenes.register_scene("a", recording(&log)).unwrap();
        scenes.set_current_scene("a", &mut lists);

        scenes.destroy_scenes();
        assert_eq!(*log.borrow(), vec!["open a"]);
        assert!(scenes.current().is_none());
        assert!(scenes.is_empty());
    }

    #[test]
    fn test_current_scene_cannot_be_removed() {
        let mut scenes = SceneManager::new();
        let mut lists = SceneLists::default();
        scenes.register_scene("a", None).unwrap();
        scenes.register_scene("b", None).unwrap();
        scenes.set_current_scene("a", &mut lists);
        assert!(scenes.remove_scene("a").is_none());
        assert!(scenes.remove_scene("b").is_some());
        assert!(!scenes.has_scene("b"));
    }
}
