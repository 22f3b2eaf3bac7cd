//! Headless arena runner
//!
//! Loads a level into a gameplay scene, steps the engine a fixed number of
//! frames and logs what was placed.

use clap::Parser;

use arena_game::scenes::GameplayScene;
use arena_game::{GameConfig, GameError, Level, SourceRegistry};
use scene_engine::foundation::logging;
use scene_engine::EngineContext;

#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(about = "Load an arena level and run it headlessly", long_about = None)]
struct Args {
    /// Game configuration file (TOML or RON)
    #[arg(short, long, default_value = "arena.toml")]
    config: String,

    /// Legend CSV, overriding the configuration
    #[arg(long)]
    legend: Option<String>,

    /// Map CSV, overriding the configuration
    #[arg(long)]
    level: Option<String>,

    /// Scene name, overriding the configuration
    #[arg(long)]
    scene: Option<String>,

    /// Map number, overriding the configuration
    #[arg(long)]
    map_number: Option<u32>,

    /// Asset root directory, overriding the configuration
    #[arg(long)]
    assets: Option<String>,

    /// Place obstacles as copies of one prototype per prop kind
    #[arg(long)]
    share_instances: bool,

    /// Frames to simulate
    #[arg(short, long, default_value_t = 60)]
    frames: u32,
}

impl Args {
    fn apply(self, config: &mut GameConfig) -> u32 {
        if let Some(legend) = self.legend {
            config.level.legend_path = legend;
        }
        if let Some(level) = self.level {
            config.level.level_path = level;
        }
        if let Some(scene) = self.scene {
            config.level.scene_name = scene;
        }
        if let Some(map_number) = self.map_number {
            config.level.map_number = map_number;
        }
        if let Some(assets) = self.assets {
            config.engine.assets.assets_dir = assets;
        }
        config.level.share_instances |= self.share_instances;
        self.frames
    }
}

fn run(args: Args) -> Result<(), GameError> {
    let mut config = GameConfig::load_or_default(&args.config)?;
    let frames = args.apply(&mut config);

    logging::init_with_level(&config.engine.engine.log_level);
    log::info!("Starting {}", config.engine.application_name);

    let mut level = Level::from_config(&config.level)?;
    let mut ctx = EngineContext::try_new(config.engine.clone())?;
    let mut sources = SourceRegistry::new(config.sources.clone());

    let scene = level.scene_name().to_string();
    ctx.scenes
        .register_scene(&scene, Some(Box::new(GameplayScene::new())))
        .map_err(scene_engine::EngineError::from)?;
    ctx.set_current_scene(&scene);
    level.generate_objects(&mut ctx, &mut sources)?;

    let step = config.engine.engine.fixed_timestep;
    for _ in 0..frames {
        ctx.update(step);
    }

    let lights = ctx
        .lists
        .lights
        .get_scene_light_list_by_name(&scene)
        .map_or(0, |l| l.light_count());
    log::info!(
        "Level '{}' (map {}): {}x{} cells, {} objects, {} obstacles, {} lights, spawn {:?}",
        scene,
        level.map_number(),
        level.column_count(),
        level.row_count(),
        level.objects().len(),
        level.obstacles().len(),
        lights,
        level.player_spawn_position()
    );
    log::info!("Simulated {} frames", ctx.frame());
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        logging::init_with_level("info");
        log::error!("{e}");
        std::process::exit(1);
    }
}
