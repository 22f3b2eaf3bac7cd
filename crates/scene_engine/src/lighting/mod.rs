//! Scene lighting
//!
//! Lights belong to a scene's [`LightList`]; the [`LightManager`] keeps one
//! list per scene and pushes light data into object materials and the
//! lighting post layers.

pub mod light;
pub mod light_list;
pub mod light_manager;

pub use light::Light;
pub use light_list::LightList;
pub use light_manager::LightManager;

/// Length of the light array in the lighting shaders
pub const MAX_LIGHTS: usize = 16;
