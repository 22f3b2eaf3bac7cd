//! Scenes and the objects they own
//!
//! - [`SceneManager`]: named scenes, one current at a time
//! - [`ObjectManager`]: one [`ObjectList`] per scene
//! - [`Object`] / [`Entity`]: what object lists hold

pub mod object;
pub mod object_manager;
pub mod scene_manager;

pub use object::{Entity, Object, ObjectFlags};
pub use object_manager::{ObjectId, ObjectList, ObjectManager};
pub use scene_manager::{EmptyScene, Scene, SceneError, SceneLists, SceneManager};
