//! End-to-end level loading from files on disk

use std::fs;

use arena_game::entities::{Obstacle, Player};
use arena_game::scenes::GameplayScene;
use arena_game::{GameConfig, Level, LevelLoadError, SourceRegistry};
use scene_engine::assets::InMemoryMeshSource;
use scene_engine::foundation::logging;
use scene_engine::foundation::math::{Vec3, Vec4};
use scene_engine::render::{Mesh, UniformValue};
use scene_engine::EngineContext;

const LEGEND: &str = "\
Legend,Symbol,Name
,W,Wall
,O,Origin
,L,Lamp post
,R,Road
,B,Barrel
";

// 3 columns x 2 rows; rows are mirrored on load, so the first data column
// becomes x = 2.
const MAP: &str = "\
map1,3x2
,W~90,W,W
,O,R|B~(0_0_1),L
";

fn engine(config: &GameConfig) -> EngineContext {
    logging::init_for_tests();
    let meshes = InMemoryMeshSource::new().with_fallback(Mesh::cuboid(Vec3::new(2.0, 2.0, 4.0)));
    EngineContext::with_mesh_source(config.engine.clone(), Box::new(meshes))
}

fn write_level(dir: &tempfile::TempDir, map: &str) -> GameConfig {
    let legend_path = dir.path().join("legend.csv");
    let level_path = dir.path().join("map1.csv");
    fs::write(&legend_path, LEGEND).unwrap();
    fs::write(&level_path, map).unwrap();

    let mut config = GameConfig::default();
    config.level.legend_path = legend_path.to_string_lossy().into_owned();
    config.level.level_path = level_path.to_string_lossy().into_owned();
    config.level.scene_name = "map1".to_string();
    config
}

#[test]
fn test_level_populates_scene() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_level(&dir, MAP);

    let mut ctx = engine(&config);
    let mut sources = SourceRegistry::with_seed(config.sources.clone(), 9);
    let mut level = Level::from_config(&config.level).unwrap();
    assert_eq!(level.row_count(), 2);
    assert_eq!(level.column_count(), 3);
    assert_eq!(level.map_limits(), Vec4::new(0.0, 0.0, 18.75, 12.5));

    ctx.scenes
        .register_scene("map1", Some(Box::new(GameplayScene::new())))
        .unwrap();
    assert!(ctx.set_current_scene("map1"));
    level.generate_objects(&mut ctx, &mut sources).unwrap();

    // Origin sits in the first data column of the second grid row
    assert_eq!(level.player_spawn_index(), Some((1, 2)));
    assert_eq!(level.player_spawn_position(), Vec3::new(12.5, 6.25, 0.0));

    // 3 walls, road, barrel, lamp, player
    assert_eq!(level.objects().len(), 7);
    assert_eq!(level.obstacles().len(), 6);

    let objects = ctx.lists.objects.get_scene_object_list_by_name("map1").unwrap();
    assert_eq!(objects.len(), 7);
    let player = objects.get_as::<Player>(level.player().unwrap()).unwrap();
    assert_eq!(player.object().position(), Vec3::new(12.5, 6.25, 0.0));

    let barrel = level
        .obstacles()
        .iter()
        .filter_map(|id| objects.get_as::<Obstacle>(*id))
        .find(|o| o.object().name() == "Barrel")
        .unwrap();
    assert_eq!(barrel.object().position(), Vec3::new(6.25, 6.25, 1.0));

    let lights = ctx.lists.lights.get_scene_light_list_by_name("map1").unwrap();
    assert_eq!(lights.light_count(), 1);
    assert_eq!(lights.lights()[0].position, Vec3::new(0.0, 6.25, 0.0));

    // The source scene is registered alongside the level scene
    assert_eq!(ctx.scenes.len(), 2);
}

#[test]
fn test_frames_apply_lighting() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_level(&dir, MAP);

    let mut ctx = engine(&config);
    let mut sources = SourceRegistry::with_seed(config.sources.clone(), 9);
    let mut level = Level::from_config(&config.level).unwrap();
    ctx.scenes
        .register_scene("map1", Some(Box::new(GameplayScene::new())))
        .unwrap();
    ctx.set_current_scene("map1");
    level.generate_objects(&mut ctx, &mut sources).unwrap();

    for _ in 0..3 {
        ctx.update(1.0 / 60.0);
    }

    let objects = ctx.lists.objects.get_scene_object_list_by_name("map1").unwrap();
    let wall = objects.get(level.obstacles()[0]).unwrap();
    let enabled = wall.object().material().get("a_EnabledLights").and_then(UniformValue::as_int);
    assert_eq!(enabled, Some(1));
}

#[test]
fn test_switching_scene_tears_down_level() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_level(&dir, MAP);

    let mut ctx = engine(&config);
    let mut sources = SourceRegistry::with_seed(config.sources.clone(), 9);
    let mut level = Level::from_config(&config.level).unwrap();
    ctx.scenes
        .register_scene("map1", Some(Box::new(GameplayScene::new())))
        .unwrap();
    ctx.scenes.register_scene("menu", None).unwrap();
    ctx.set_current_scene("map1");
    level.generate_objects(&mut ctx, &mut sources).unwrap();

    assert!(ctx.set_current_scene("menu"));
    assert!(!ctx.lists.objects.scene_object_list_exists("map1"));
    assert!(!ctx.lists.lights.scene_light_list_exists("map1"));
}

#[test]
fn test_malformed_cell_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_level(&dir, "map1,1x1\n,W~1~2~3\n");
    let result = Level::from_config(&config.level);
    assert!(matches!(result, Err(LevelLoadError::InvalidMapData(_))));
}
