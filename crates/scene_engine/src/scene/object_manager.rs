//! Per-scene object lists
//!
//! Each scene owns at most one [`ObjectList`]; the [`ObjectManager`] is the
//! registry of those lists, keyed by scene name. Objects inside a list are
//! addressed by generational [`ObjectId`] handles that stay valid until the
//! object is removed.

use slotmap::{new_key_type, SlotMap};

use crate::foundation::collections::NamedRegistry;
use super::object::Entity;

new_key_type! {
    /// Stable handle to an object inside an [`ObjectList`]
    pub struct ObjectId;
}

/// The objects owned by one scene
#[derive(Debug)]
pub struct ObjectList {
    scene_name: String,
    objects: SlotMap<ObjectId, Box<dyn Entity>>,
}

impl ObjectList {
    /// Create an empty list for `scene_name`
    pub fn new(scene_name: impl Into<String>) -> Self {
        Self {
            scene_name: scene_name.into(),
            objects: SlotMap::with_key(),
        }
    }

    /// Owning scene
    pub fn scene_name(&self) -> &str {
        &self.scene_name
    }

    /// Take ownership of an entity
    pub fn add_object(&mut self, entity: Box<dyn Entity>) -> ObjectId {
        self.objects.insert(entity)
    }

    /// Entity by handle
    pub fn get(&self, id: ObjectId) -> Option<&dyn Entity> {
        self.objects.get(id).map(|e| &**e)
    }

    /// Mutable entity by handle
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut (dyn Entity + 'static)> {
        self.objects.get_mut(id).map(|e| &mut **e)
    }

    /// Entity by handle, downcast to its concrete type
    pub fn get_as<T: Entity>(&self, id: ObjectId) -> Option<&T> {
        self.get(id)?.as_any().downcast_ref::<T>()
    }

    /// Mutable entity by handle, downcast to its concrete type
    pub fn get_as_mut<T: Entity>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.get_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// Whether `id` refers to a live object
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Remove and return an entity
    pub fn remove_object(&mut self, id: ObjectId) -> Option<Box<dyn Entity>> {
        self.objects.remove(id)
    }

    /// Remove and drop an entity
    pub fn delete_object(&mut self, id: ObjectId) -> bool {
        self.objects.remove(id).is_some()
    }

    /// Drop every entity
    pub fn delete_all_objects(&mut self) {
        self.objects.clear();
    }

    /// Live handles
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys()
    }

    /// Iterate entities
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &dyn Entity)> {
        self.objects.iter().map(|(id, e)| (id, &**e))
    }

    /// Iterate entities mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut Box<dyn Entity>)> {
        self.objects.iter_mut()
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Update every entity
    pub fn update(&mut self, delta_time: f32) {
        for entity in self.objects.values_mut() {
            entity.update(delta_time);
        }
    }
}

/// Registry of object lists keyed by scene name
#[derive(Debug, Default)]
pub struct ObjectManager {
    lists: NamedRegistry<ObjectList>,
}

impl ObjectManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the object list for `name`; `false` if it already exists
    pub fn create_scene_object_list(&mut self, name: &str) -> bool {
        if self.lists.insert(name, ObjectList::new(name)).is_err() {
            log::debug!("Object list for scene '{name}' already exists");
            return false;
        }
        true
    }

    /// Whether `name` has an object list
    pub fn scene_object_list_exists(&self, name: &str) -> bool {
        self.lists.contains(name)
    }

    /// Object list by registration index
    pub fn get_scene_object_list_by_index(&self, index: usize) -> Option<&ObjectList> {
        self.lists.get_index(index).map(|(_, list)| list)
    }

    /// Object list by scene name
    pub fn get_scene_object_list_by_name(&self, name: &str) -> Option<&ObjectList> {
        self.lists.get(name)
    }

    /// Mutable object list by scene name
    pub fn get_scene_object_list_by_name_mut(&mut self, name: &str) -> Option<&mut ObjectList> {
        self.lists.get_mut(name)
    }

    /// Add `entity` to the list of the scene it names
    ///
    /// When that scene has no list yet, one is created if `add_scene` is set;
    /// otherwise the entity is dropped and `None` returned.
    pub fn add_object_to_scene_object_list(&mut self, entity: Box<dyn Entity>, add_scene: bool) -> Option<ObjectId> {
        let scene = entity.object().scene_name().to_string();
        if !self.lists.contains(&scene) {
            if !add_scene {
                log::warn!("No object list for scene '{scene}'");
                return None;
            }
            self.create_scene_object_list(&scene);
        }
        self.lists.get_mut(&scene).map(|list| list.add_object(entity))
    }

    /// Drop the list at `index`
    pub fn destroy_scene_object_list_by_index(&mut self, index: usize) -> bool {
        self.lists.remove_index(index).is_some()
    }

    /// Drop the list for `name`
    pub fn destroy_scene_object_list_by_name(&mut self, name: &str) -> bool {
        self.lists.remove(name).is_some()
    }

    /// Drop every list
    pub fn destroy_all_scene_object_lists(&mut self) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::Object;

    #[test]
    fn test_duplicate_list_rejected() {
        let mut manager = ObjectManager::new();
        assert!(manager.create_scene_object_list("level"));
        assert!(!manager.create_scene_object_list("level"));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_add_object_creates_list_on_request() {
        let mut manager = ObjectManager::new();
        let object = Box::new(Object::new("crate", "level"));
        assert!(manager.add_object_to_scene_object_list(object.clone(), false).is_none());
        assert!(!manager.scene_object_list_exists("level"));

        let id = manager.add_object_to_scene_object_list(object, true).unwrap();
        let list = manager.get_scene_object_list_by_name("level").unwrap();
        assert_eq!(list.get(id).unwrap().object().name(), "crate");
    }

    #[test]
    fn test_handles_survive_other_removals() {
        let mut list = ObjectList::new("level");
        let a = list.add_object(Box::new(Object::new("a", "level")));
        let b = list.add_object(Box::new(Object::new("b", "level")));
        assert!(list.delete_object(a));
        assert!(!list.contains(a));
        assert!(!list.delete_object(a));

        list.get_mut(b).unwrap().object_mut().set_position(Vec3::x());
        assert_eq!(list.get_as::<Object>(b).unwrap().position(), Vec3::x());
    }

    #[test]
    fn test_destroy_by_index_and_name() {
        let mut manager = ObjectManager::new();
        manager.create_scene_object_list("a");
        manager.create_scene_object_list("b");
        manager.create_scene_object_list("c");
        assert!(manager.destroy_scene_object_list_by_index(0));
        assert!(!manager.destroy_scene_object_list_by_index(5));
        assert!(manager.destroy_scene_object_list_by_name("c"));
        assert!(!manager.destroy_scene_object_list_by_name("c"));
        assert_eq!(manager.get_scene_object_list_by_index(0).unwrap().scene_name(), "b");

        manager.destroy_all_scene_object_lists();
        assert!(manager.is_empty());
    }
}
