//! Game configuration

use std::path::Path;

use scene_engine::core::config::{ApplicationConfig, Config, ConfigError};
use serde::{Deserialize, Serialize};

use crate::entities::EnemyType;

/// Which level to load and how to populate it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Legend CSV path
    pub legend_path: String,
    /// Map CSV path
    pub level_path: String,
    /// Scene the level populates
    pub scene_name: String,
    /// Map number, informational
    pub map_number: u32,
    /// Place obstacles as deep copies of one prototype per prop kind
    pub share_instances: bool,
    /// Debug-draw obstacle physics bodies
    pub show_physics_bodies: bool,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            legend_path: "res/data/legend.csv".to_string(),
            level_path: "res/data/map1.csv".to_string(),
            scene_name: "map1".to_string(),
            map_number: 1,
            share_instances: false,
            show_physics_bodies: false,
        }
    }
}

/// Mesh paths of the once-built source objects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Player mesh
    pub player_mesh: String,
    /// Marauder mesh
    pub marauder_mesh: String,
    /// Oracle mesh
    pub oracle_mesh: String,
    /// Sentry mesh
    pub sentry_mesh: String,
    /// Bastion mesh
    pub bastion_mesh: String,
    /// Mechaspider mesh
    pub mechaspider_mesh: String,
    /// Arrow projectile mesh
    pub arrow_mesh: String,
}

impl SourceConfig {
    /// Mesh path for an enemy type
    pub fn enemy_mesh(&self, kind: EnemyType) -> &str {
        match kind {
            EnemyType::Marauder => &self.marauder_mesh,
            EnemyType::Oracle => &self.oracle_mesh,
            EnemyType::Sentry => &self.sentry_mesh,
            EnemyType::Bastion => &self.bastion_mesh,
            EnemyType::Mechaspider => &self.mechaspider_mesh,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            player_mesh: "res/objects/hero/charactoereee.obj".to_string(),
            marauder_mesh: "res/objects/enemies/marauder.obj".to_string(),
            oracle_mesh: "res/objects/enemies/oracle.obj".to_string(),
            sentry_mesh: "res/objects/enemies/sentry.obj".to_string(),
            bastion_mesh: "res/objects/enemies/bastion.obj".to_string(),
            mechaspider_mesh: "res/objects/enemies/mechaspider.obj".to_string(),
            arrow_mesh: "res/objects/weapons/arrow.obj".to_string(),
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Engine configuration
    pub engine: ApplicationConfig,
    /// Level selection
    pub level: LevelConfig,
    /// Source object meshes
    pub sources: SourceConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            engine: ApplicationConfig::new("Arena"),
            level: LevelConfig::default(),
            sources: SourceConfig::default(),
        }
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// Load `path`, or use the defaults when no file exists there
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            log::info!("No game config at '{}', using defaults", path.display());
            Ok(Self::default())
        }
    }
}
