//! Registry of per-scene light lists

use crate::core::config::LightingConfig;
use crate::foundation::collections::NamedRegistry;
use crate::scene::ObjectList;
use super::light::Light;
use super::light_list::LightList;

/// One [`LightList`] per scene, keyed by scene name
#[derive(Debug, Default)]
pub struct LightManager {
    lists: NamedRegistry<LightList>,
    config: LightingConfig,
}

impl LightManager {
    /// Create a manager that builds lists from `config`
    pub fn new(config: LightingConfig) -> Self {
        Self {
            lists: NamedRegistry::new(),
            config,
        }
    }

    /// Configuration used for new lists
    pub fn config(&self) -> &LightingConfig {
        &self.config
    }

    /// Create the light list for `name`; `false` if it already exists
    pub fn create_scene_light_list(&mut self, name: &str) -> bool {
        if self.lists.contains(name) {
            log::debug!("Light list for scene '{name}' already exists");
            return false;
        }
        self.lists.insert(name, LightList::new(name, &self.config)).is_ok()
    }

    /// Whether `name` has a light list
    pub fn scene_light_list_exists(&self, name: &str) -> bool {
        self.lists.contains(name)
    }

    /// Light list by registration index
    pub fn get_scene_light_list_by_index(&self, index: usize) -> Option<&LightList> {
        self.lists.get_index(index).map(|(_, list)| list)
    }

    /// Light list by scene name
    pub fn get_scene_light_list_by_name(&self, name: &str) -> Option<&LightList> {
        self.lists.get(name)
    }

    /// Mutable light list by scene name
    pub fn get_scene_light_list_by_name_mut(&mut self, name: &str) -> Option<&mut LightList> {
        self.lists.get_mut(name)
    }

    /// Add `light` to the list of the scene it names
    ///
    /// When that scene has no list yet, one is created if `add_scene` is set;
    /// otherwise nothing happens and `false` is returned.
    pub fn add_light_to_scene_light_list(&mut self, light: Light, add_scene: bool) -> bool {
        if !self.lists.contains(&light.scene) {
            if !add_scene {
                log::warn!("No light list for scene '{}'", light.scene);
                return false;
            }
            self.create_scene_light_list(&light.scene);
        }
        match self.lists.get_mut(&light.scene) {
            Some(list) => {
                list.add_light(light);
                true
            }
            None => false,
        }
    }

    /// Write the lights of `objects`' scene into every object's material
    ///
    /// Returns `false` when that scene has no light list.
    pub fn apply_lights_to_objects(&self, objects: &mut ObjectList) -> bool {
        match self.lists.get(objects.scene_name()) {
            Some(list) => {
                list.update_materials(objects);
                true
            }
            None => false,
        }
    }

    /// Mean of every light in scene `name`
    ///
    /// `None` for an unknown scene or a scene with no lights.
    pub fn get_scene_lights_merged(&self, name: &str) -> Option<Light> {
        self.lists.get(name)?.lights_merged()
    }

    /// Drop the list at `index`
    pub fn destroy_scene_light_list_by_index(&mut self, index: usize) -> bool {
        self.lists.remove_index(index).is_some()
    }

    /// Drop the list for `name`
    pub fn destroy_scene_light_list_by_name(&mut self, name: &str) -> bool {
        self.lists.remove(name).is_some()
    }

    /// Drop every list
    pub fn destroy_all_scene_light_lists(&mut self) {
        self.lists.clear();
    }

    /// Number of lists
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether no list exists
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
