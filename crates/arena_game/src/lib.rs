//! # Arena Game
//!
//! Tile-map arena game built on `scene_engine`. Levels are authored as a
//! legend CSV (symbol to prop name) plus a map CSV grid; loading a level
//! places obstacles, lamp lights and the player into a gameplay scene.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod entities;
pub mod level;
pub mod scenes;
pub mod sources;

use scene_engine::config::ConfigError;
use scene_engine::EngineError;

pub use config::{GameConfig, LevelConfig, SourceConfig};
pub use level::{Level, LevelError, LevelLoadError};
pub use sources::SourceRegistry;

/// Top-level game errors
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Engine setup failed
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Configuration could not be read
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Level files could not be parsed
    #[error("Level load error: {0}")]
    LevelLoad(#[from] LevelLoadError),

    /// Level objects could not be generated
    #[error("Level error: {0}")]
    Level(#[from] LevelError),
}
