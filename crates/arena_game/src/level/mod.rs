//! Tile-map levels
//!
//! A [`Level`] is built from a legend CSV and a map CSV. Construction only
//! parses; [`Level::generate_objects`] places the player, obstacles and lamp
//! lights into the level's scene.

pub mod cell;
pub mod legend;
pub mod map;
pub mod props;

mod generate;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use scene_engine::assets::AssetError;
use scene_engine::foundation::math::{Vec2, Vec3, Vec4};
use scene_engine::scene::{ObjectId, SceneError};

use crate::config::LevelConfig;
use crate::entities::Obstacle;

pub use cell::{CellEntry, CellParseError, TransformOverride};
pub use legend::Legend;
pub use map::TileMap;
pub use props::{BodySize, PropDescriptor, PROPS};

/// World distance between neighbouring cells
pub const CELL_OFFSET: f32 = 6.25;

/// Legend name of the player spawn
pub const ORIGIN: &str = "Origin";

/// Errors while reading level files
#[derive(thiserror::Error, Debug)]
pub enum LevelLoadError {
    /// Legend header is not `Legend,Symbol,Name`
    #[error("Invalid legend header '{0}', expected 'Legend,Symbol,Name'")]
    InvalidLegendFormat(String),

    /// The map size cell is not `<width>x<height>`
    #[error("Invalid map size '{0}'")]
    InvalidMapSize(String),

    /// Grid rows or cells are missing or malformed
    #[error("Invalid map data: {0}")]
    InvalidMapData(String),

    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors while generating level objects
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    /// A mesh could not be loaded
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Scene registration failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// The scene's object list vanished during generation
    #[error("Scene '{0}' has no object list")]
    MissingObjectList(String),
}

/// Level loading progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelState {
    /// Legend parsed, map not yet parsed
    LegendLoaded,
    /// Both files parsed
    LevelLoaded,
    /// Objects placed into the scene
    ObjectsGenerated,
}

/// A parsed level and the objects it placed
#[derive(Debug)]
pub struct Level {
    scene_name: String,
    map_number: u32,
    legend: Legend,
    map: TileMap,
    state: LevelState,
    objects: Vec<ObjectId>,
    obstacles: Vec<ObjectId>,
    player: Option<ObjectId>,
    player_spawn_position: Vec3,
    player_spawn_index: Option<(usize, usize)>,
    share_instances: bool,
    show_physics_bodies: bool,
    prototypes: HashMap<&'static str, Obstacle>,
}

impl Level {
    /// Parse the legend and map files
    pub fn load(
        legend_path: impl AsRef<Path>,
        level_path: impl AsRef<Path>,
        scene_name: &str,
        map_number: u32,
    ) -> Result<Self, LevelLoadError> {
        let legend_path = legend_path.as_ref();
        let level_path = level_path.as_ref();
        let open = |path: &Path| {
            File::open(path).map(BufReader::new).map_err(|e| {
                log::error!("Cannot open '{}': {e}", path.display());
                LevelLoadError::Io(e)
            })
        };
        Self::from_readers(open(legend_path)?, open(level_path)?, scene_name, map_number)
    }

    /// Parse a legend and map from readers
    pub fn from_readers(
        legend: impl Read,
        level: impl Read,
        scene_name: &str,
        map_number: u32,
    ) -> Result<Self, LevelLoadError> {
        let legend = Legend::from_reader(legend).map_err(|e| {
            log::error!("Legend for '{scene_name}' is not valid: {e}");
            e
        })?;
        log::trace!("Legend valid");

        let map = TileMap::from_reader(level).map_err(|e| {
            log::error!("Level for '{scene_name}' is not valid: {e}");
            e
        })?;
        log::info!(
            "Loaded level '{scene_name}' ({}x{} cells, {} legend symbols)",
            map.column_count(),
            map.row_count(),
            legend.len()
        );

        Ok(Self {
            scene_name: scene_name.to_string(),
            map_number,
            legend,
            map,
            state: LevelState::LevelLoaded,
            objects: Vec::new(),
            obstacles: Vec::new(),
            player: None,
            player_spawn_position: Vec3::zeros(),
            player_spawn_index: None,
            share_instances: false,
            show_physics_bodies: false,
            prototypes: HashMap::new(),
        })
    }

    /// Load the files named in `config` and apply its options
    pub fn from_config(config: &LevelConfig) -> Result<Self, LevelLoadError> {
        Ok(Self::load(&config.legend_path, &config.level_path, &config.scene_name, config.map_number)?
            .with_instance_sharing(config.share_instances)
            .with_physics_bodies_visible(config.show_physics_bodies))
    }

    /// Place obstacles as deep copies of one prototype per prop kind
    #[must_use]
    pub fn with_instance_sharing(mut self, enabled: bool) -> Self {
        self.share_instances = enabled;
        self
    }

    /// Debug-draw obstacle physics bodies
    #[must_use]
    pub fn with_physics_bodies_visible(mut self, visible: bool) -> Self {
        self.show_physics_bodies = visible;
        self
    }

    /// Scene the level populates
    pub fn scene_name(&self) -> &str {
        &self.scene_name
    }

    /// Map number
    pub fn map_number(&self) -> u32 {
        self.map_number
    }

    /// Symbol table
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Cell grid
    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// Replace the grid; bounds follow the new grid
    pub fn set_map(&mut self, map: TileMap) {
        self.map = map;
    }

    /// Number of grid rows
    pub fn row_count(&self) -> usize {
        self.map.row_count()
    }

    /// Number of grid columns
    pub fn column_count(&self) -> usize {
        self.map.column_count()
    }

    /// Lower world bound of the map
    pub fn map_minimum(&self) -> Vec2 {
        self.map.minimum()
    }

    /// Upper world bound of the map
    pub fn map_maximum(&self) -> Vec2 {
        self.map.maximum()
    }

    /// `(min.x, min.y, max.x, max.y)`
    pub fn map_limits(&self) -> Vec4 {
        let (min, max) = (self.map_minimum(), self.map_maximum());
        Vec4::new(min.x, min.y, max.x, max.y)
    }

    /// Modifiers of the first object in the cell at column `x`, row `y`
    pub fn cell_properties(&self, x: usize, y: usize) -> Option<&[f32]> {
        self.map.entries(x, y)?.first().map(|e| e.modifiers.as_slice())
    }

    /// Every object the level placed, player included
    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    /// Placed obstacles
    pub fn obstacles(&self) -> &[ObjectId] {
        &self.obstacles
    }

    /// Whether objects have been generated
    pub fn objects_generated(&self) -> bool {
        self.state == LevelState::ObjectsGenerated
    }

    /// The player, once generated
    pub fn player(&self) -> Option<ObjectId> {
        self.player
    }

    /// World position of the spawn cell
    pub fn player_spawn_position(&self) -> Vec3 {
        self.player_spawn_position
    }

    /// Spawn cell as `(row, column)`
    pub fn player_spawn_index(&self) -> Option<(usize, usize)> {
        self.player_spawn_index
    }

    /// Loading progress
    pub fn state(&self) -> LevelState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const LEGEND: &str = "Legend,Symbol,Name\n,W,Wall\n,O,Origin\n";

    #[test]
    fn test_from_readers() {
        let level = Level::from_readers(LEGEND.as_bytes(), "map,2x1\n,W~90,O\n".as_bytes(), "alley", 2).unwrap();
        assert_eq!(level.state(), LevelState::LevelLoaded);
        assert_eq!(level.scene_name(), "alley");
        assert_eq!(level.map_number(), 2);
        assert!(!level.objects_generated());
        assert_eq!(level.cell_properties(1, 0), Some(&[90.0][..]));
        assert_relative_eq!(level.map_limits(), Vec4::new(0.0, 0.0, 12.5, 6.25));
    }

    #[test]
    fn test_invalid_files() {
        let bad_legend = Level::from_readers("nope\n".as_bytes(), "map,1x1\n,W\n".as_bytes(), "a", 1);
        assert!(matches!(bad_legend, Err(LevelLoadError::InvalidLegendFormat(_))));
        let bad_size = Level::from_readers(LEGEND.as_bytes(), "map,1by1\n,W\n".as_bytes(), "a", 1);
        assert!(matches!(bad_size, Err(LevelLoadError::InvalidMapSize(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Level::load(dir.path().join("legend.csv"), dir.path().join("map.csv"), "a", 1);
        assert!(matches!(result, Err(LevelLoadError::Io(_))));
    }

    #[test]
    fn test_set_map_updates_bounds() {
        let mut level = Level::from_readers(LEGEND.as_bytes(), "map,1x1\n,W\n".as_bytes(), "a", 1).unwrap();
        let rows = vec![vec!["W".to_string(); 3]; 2];
        level.set_map(TileMap::from_rows(rows).unwrap());
        assert_relative_eq!(level.map_maximum(), Vec2::new(18.75, 12.5));
        assert_eq!(level.column_count(), 3);
    }
}
