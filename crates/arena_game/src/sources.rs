//! Source prototypes
//!
//! The player, one enemy of every type and the arrow projectile are built
//! once into a hidden scene with a random name. Level generation and
//! gameplay clone from these prototypes instead of reloading meshes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scene_engine::foundation::math::Vec3;
use scene_engine::physics::PhysicsBody;
use scene_engine::EngineContext;

use crate::config::SourceConfig;
use crate::entities::{Enemy, EnemyType, Player, Projectile};
use crate::level::LevelError;

const SCENE_PREFIX: &str = "rand_";
const SCENE_NAME_PIECES: usize = 10;

/// The prototypes built by [`SourceRegistry::generate`]
#[derive(Debug, Clone)]
pub struct SourcePrototypes {
    /// Hidden scene owning the prototypes
    pub scene_name: String,
    /// Default player
    pub player: Player,
    /// One enemy per type, in [`EnemyType::ALL`] order
    pub enemies: Vec<Enemy>,
    /// Arrow fired by sentries
    pub arrow: Projectile,
}

impl SourcePrototypes {
    /// Prototype for an enemy type
    pub fn enemy(&self, kind: EnemyType) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.kind() == kind)
    }
}

/// Builds the source prototypes at most once
#[derive(Debug)]
pub struct SourceRegistry {
    config: SourceConfig,
    rng: StdRng,
    prototypes: Option<SourcePrototypes>,
}

impl SourceRegistry {
    /// Registry with an entropy-seeded name generator
    pub fn new(config: SourceConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Registry with a deterministic name generator
    pub fn with_seed(config: SourceConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SourceConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            prototypes: None,
        }
    }

    /// Mesh paths used for the prototypes
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Whether the prototypes exist
    pub fn is_generated(&self) -> bool {
        self.prototypes.is_some()
    }

    /// The prototypes, once generated
    pub fn prototypes(&self) -> Option<&SourcePrototypes> {
        self.prototypes.as_ref()
    }

    /// Build the prototypes; a second call logs a warning and returns `false`
    pub fn generate(&mut self, ctx: &mut EngineContext) -> Result<bool, LevelError> {
        if self.prototypes.is_some() {
            log::warn!("Source objects have already been generated");
            return Ok(false);
        }
        self.prototypes = Some(self.build(ctx)?);
        Ok(true)
    }

    /// Generate the prototypes if needed and return them
    pub fn ensure_generated(&mut self, ctx: &mut EngineContext) -> Result<&SourcePrototypes, LevelError> {
        let prototypes = match self.prototypes.take() {
            Some(prototypes) => prototypes,
            None => self.build(ctx)?,
        };
        Ok(self.prototypes.insert(prototypes))
    }

    fn build(&mut self, ctx: &mut EngineContext) -> Result<SourcePrototypes, LevelError> {
        let scene_name = self.unused_scene_name(ctx);

        let player_mesh = ctx.meshes.get(&self.config.player_mesh)?;
        let player = Player::generate_default(&scene_name, &self.config.player_mesh, player_mesh);

        let mut enemies = Vec::with_capacity(EnemyType::ALL.len());
        for kind in EnemyType::ALL {
            let path = self.config.enemy_mesh(kind);
            let mesh = ctx.meshes.get(path)?;
            enemies.push(Enemy::from_mesh(kind, &scene_name, path, mesh));
        }

        let arrow_mesh = ctx.meshes.get(&self.config.arrow_mesh)?;
        let mut arrow = Projectile::from_mesh("arrow", &scene_name, &self.config.arrow_mesh, arrow_mesh);
        let size = arrow.object().mesh_extents();
        arrow.set_pbody_size(size);
        arrow.object_mut().add_physics_body(PhysicsBody::new_box(Vec3::zeros(), size * 2.0));
        arrow.set_emissive_color(Vec3::new(1.0, 0.1, 0.24));
        arrow.set_emissive_power(2.0);
        arrow.set_max_lifetime(5.0);

        ctx.scenes.register_scene(&scene_name, None)?;
        log::info!("Generated source objects in scene '{}'", scene_name.escape_debug());
        Ok(SourcePrototypes {
            scene_name,
            player,
            enemies,
            arrow,
        })
    }

    /// `"rand_"` followed by ten pieces, each a random byte written either
    /// as decimal digits or as the character with that code
    pub fn random_scene_name(&mut self) -> String {
        let mut name = String::from(SCENE_PREFIX);
        for _ in 0..SCENE_NAME_PIECES {
            let code: u8 = self.rng.gen();
            if self.rng.gen_bool(0.5) {
                name.push_str(&code.to_string());
            } else {
                name.push(char::from(code));
            }
        }
        name
    }

    fn unused_scene_name(&mut self, ctx: &EngineContext) -> String {
        loop {
            let name = self.random_scene_name();
            if !ctx.scenes.has_scene(&name) {
                return name;
            }
            log::debug!("Source scene name collision, retrying");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_engine::assets::InMemoryMeshSource;
    use scene_engine::core::config::ApplicationConfig;
    use scene_engine::render::Mesh;

    fn context() -> EngineContext {
        let source = InMemoryMeshSource::new().with_fallback(Mesh::cuboid(Vec3::new(1.0, 0.5, 4.0)));
        EngineContext::with_mesh_source(ApplicationConfig::default(), Box::new(source))
    }

    #[test]
    fn test_random_scene_name_shape() {
        let mut sources = SourceRegistry::with_seed(SourceConfig::default(), 7);
        let name = sources.random_scene_name();
        assert!(name.starts_with("rand_"));
        assert!(name.chars().count() >= SCENE_PREFIX.len() + SCENE_NAME_PIECES);
        let again = SourceRegistry::with_seed(SourceConfig::default(), 7).random_scene_name();
        assert_eq!(name, again);
    }

    #[test]
    fn test_generate_once() {
        let mut ctx = context();
        let mut sources = SourceRegistry::with_seed(SourceConfig::default(), 1);
        assert!(sources.generate(&mut ctx).unwrap());
        assert!(!sources.generate(&mut ctx).unwrap());
        assert_eq!(ctx.scenes.len(), 1);

        let prototypes = sources.prototypes().unwrap();
        assert!(ctx.scenes.has_scene(&prototypes.scene_name));
        assert_eq!(prototypes.enemies.len(), EnemyType::ALL.len());
        assert!(prototypes.enemy(EnemyType::Sentry).unwrap().is_using_projectiles());
        assert_eq!(prototypes.player.object().scene_name(), prototypes.scene_name);
    }

    #[test]
    fn test_arrow_prototype() {
        let mut ctx = context();
        let mut sources = SourceRegistry::with_seed(SourceConfig::default(), 3);
        let arrow = &sources.ensure_generated(&mut ctx).unwrap().arrow;
        assert_eq!(arrow.pbody_size(), Vec3::new(1.0, 0.5, 4.0));
        assert_eq!(arrow.object().physics_bodies()[0].size(), Vec3::new(2.0, 1.0, 8.0));
        assert_eq!(arrow.emissive_color(), Vec3::new(1.0, 0.1, 0.24));
        assert!((arrow.max_lifetime() - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_mesh_fails() {
        let mut ctx = EngineContext::with_mesh_source(ApplicationConfig::default(), Box::new(InMemoryMeshSource::new()));
        let mut sources = SourceRegistry::with_seed(SourceConfig::default(), 1);
        assert!(matches!(sources.generate(&mut ctx), Err(LevelError::Asset(_))));
        assert!(!sources.is_generated());
        assert!(ctx.scenes.is_empty());
    }
}
