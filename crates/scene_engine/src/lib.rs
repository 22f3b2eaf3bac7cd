//! # Scene Engine
//!
//! A headless scene, lighting and animation engine for tile-based 3D games.
//!
//! ## Features
//!
//! - **Scene Registry**: Named scenes with open/close transitions
//! - **Per-Scene Lists**: Object and light lists owned per scene
//! - **Lighting**: Light uniforms pushed into materials and post layers
//! - **Morph Animation**: Keyframe vertex interpolation with a pose cache
//! - **Asset Loading**: Wavefront OBJ meshes with a shared mesh cache
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = EngineContext::new(ApplicationConfig::default());
//!     engine.scenes.register_scene("level", None)?;
//!     engine.set_current_scene("level");
//!     engine.update(1.0 / 60.0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod assets;
pub mod render;
pub mod physics;
pub mod animation;
pub mod lighting;
pub mod scene;

mod engine;

pub use engine::{EngineContext, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        EngineContext, EngineError,
        foundation::math::{Vec2, Vec3, Vec4, Quat},
        assets::{MeshCache, MeshSource, ObjMeshSource, AssetError},
        render::{Material, Mesh, Vertex, UniformValue},
        physics::PhysicsBody,
        animation::{Animation, AnimationManager, MorphAnimation, MorphAnimationFrame},
        lighting::{Light, LightList, LightManager, MAX_LIGHTS},
        scene::{Entity, Object, ObjectId, ObjectList, ObjectManager, Scene, SceneLists, SceneManager},
        core::config::{ApplicationConfig, EngineConfig, AssetConfig, LightingConfig},
    };
}
