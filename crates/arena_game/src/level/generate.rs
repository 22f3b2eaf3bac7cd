//! Object generation

use scene_engine::foundation::math::Vec3;
use scene_engine::physics::PhysicsBody;
use scene_engine::scene::{ObjectId, ObjectList};
use scene_engine::EngineContext;

use crate::entities::{Obstacle, Player};
use crate::sources::SourceRegistry;

use super::cell::CellEntry;
use super::props::{self, PropDescriptor};
use super::{Level, LevelError, LevelState, CELL_OFFSET, ORIGIN};

#[allow(clippy::cast_precision_loss)]
fn cell_position(x: usize, y: usize) -> Vec3 {
    Vec3::new(CELL_OFFSET * x as f32, CELL_OFFSET * y as f32, 0.0)
}

impl Level {
    /// Populate the level's scene from the map
    ///
    /// Creates the scene's object and light lists when missing, then walks
    /// every cell: `Origin` places the player, known prop names place
    /// obstacles (and lamp lights), anything else is skipped. A player is
    /// created at the world origin when the map has no `Origin`.
    ///
    /// Calling this again while the placed objects are still in the scene
    /// logs a warning and returns them. When the scene's lists were torn down
    /// in between (the scene was closed), the level is generated afresh. A
    /// failed pass removes whatever it had already placed.
    pub fn generate_objects(
        &mut self,
        ctx: &mut EngineContext,
        sources: &mut SourceRegistry,
    ) -> Result<&[ObjectId], LevelError> {
        if self.state == LevelState::ObjectsGenerated {
            if self.objects_live(ctx) {
                log::warn!("Objects for '{}' have already been generated", self.scene_name);
                return Ok(&self.objects);
            }
            log::info!("Objects for '{}' left the scene; generating again", self.scene_name);
        }

        if !ctx.lists.objects.scene_object_list_exists(&self.scene_name) {
            ctx.lists.objects.create_scene_object_list(&self.scene_name);
        }
        if !ctx.lists.lights.scene_light_list_exists(&self.scene_name) {
            ctx.lists.lights.create_scene_light_list(&self.scene_name);
        }

        self.forget_objects();
        let light_mark = ctx
            .lists
            .lights
            .get_scene_light_list_by_name(&self.scene_name)
            .map_or(0, |l| l.light_count());

        if let Err(e) = self.populate(ctx, sources) {
            log::error!("Generating objects for '{}' failed: {e}", self.scene_name);
            self.roll_back(ctx, light_mark);
            return Err(e);
        }

        self.state = LevelState::ObjectsGenerated;
        log::info!(
            "Generated {} objects ({} obstacles) for '{}'",
            self.objects.len(),
            self.obstacles.len(),
            self.scene_name
        );
        Ok(&self.objects)
    }

    fn populate(&mut self, ctx: &mut EngineContext, sources: &mut SourceRegistry) -> Result<(), LevelError> {
        for y in 0..self.map.row_count() {
            for x in 0..self.map.column_count() {
                let entries = self.map.entries(x, y).map(<[CellEntry]>::to_vec).unwrap_or_default();
                for entry in &entries {
                    self.place_entry(ctx, sources, x, y, entry)?;
                }
            }
        }

        if self.player.is_none() {
            log::warn!("Level '{}' has no {ORIGIN}; placing the player at the world origin", self.scene_name);
            self.spawn_player(ctx, sources, Vec3::zeros())?;
        }
        Ok(())
    }

    /// Whether the scene still holds every object this level placed
    fn objects_live(&self, ctx: &EngineContext) -> bool {
        ctx.lists
            .objects
            .get_scene_object_list_by_name(&self.scene_name)
            .is_some_and(|list| self.objects.iter().all(|id| list.contains(*id)))
    }

    fn forget_objects(&mut self) {
        self.state = LevelState::LevelLoaded;
        self.objects.clear();
        self.obstacles.clear();
        self.player = None;
        self.player_spawn_index = None;
        self.player_spawn_position = Vec3::zeros();
    }

    /// Delete the objects placed by a failed pass and the lights added after `light_mark`
    fn roll_back(&mut self, ctx: &mut EngineContext, light_mark: usize) {
        if let Some(list) = ctx.lists.objects.get_scene_object_list_by_name_mut(&self.scene_name) {
            for id in &self.objects {
                list.delete_object(*id);
            }
        }
        if let Some(lights) = ctx.lists.lights.get_scene_light_list_by_name_mut(&self.scene_name) {
            while lights.light_count() > light_mark {
                lights.remove_light_by_index(lights.light_count() - 1);
            }
        }
        self.forget_objects();
    }

    fn place_entry(
        &mut self,
        ctx: &mut EngineContext,
        sources: &mut SourceRegistry,
        x: usize,
        y: usize,
        entry: &CellEntry,
    ) -> Result<(), LevelError> {
        let Some(name) = self.legend.name(&entry.symbol) else {
            log::debug!("Symbol '{}' at ({x}, {y}) is not in the legend", entry.symbol);
            return Ok(());
        };

        if name == ORIGIN {
            self.player_spawn_index = Some((y, x));
            self.player_spawn_position = cell_position(x, y);
            return self.spawn_player(ctx, sources, self.player_spawn_position);
        }

        match props::find_prop(name) {
            Some(prop) => self.place_prop(ctx, prop, x, y, entry),
            None => {
                log::debug!("No prop named '{name}' at ({x}, {y})");
                Ok(())
            }
        }
    }

    fn spawn_player(
        &mut self,
        ctx: &mut EngineContext,
        sources: &mut SourceRegistry,
        position: Vec3,
    ) -> Result<(), LevelError> {
        let scene = self.scene_name.clone();

        if let Some(id) = self.player {
            let list = object_list(ctx, &scene)?;
            if let Some(player) = list.get_as_mut::<Player>(id) {
                player.object_mut().set_position(position);
            }
            return Ok(());
        }

        let mut player = sources.ensure_generated(ctx)?.player.copy_to_scene(&scene);
        player.object_mut().set_position(position);
        let id = object_list(ctx, &scene)?.add_object(Box::new(player));
        self.player = Some(id);
        self.objects.push(id);
        Ok(())
    }

    fn new_obstacle(&mut self, ctx: &mut EngineContext, prop: &'static PropDescriptor) -> Result<Obstacle, LevelError> {
        if self.share_instances {
            if let Some(prototype) = self.prototypes.get(prop.name) {
                let mut copy = prototype.copy_to_scene(&self.scene_name);
                copy.reset_placement();
                return Ok(copy);
            }
        }

        let mesh = ctx.meshes.get(prop.mesh_path)?;
        let obstacle = Obstacle::from_mesh(prop.name, &self.scene_name, prop.mesh_path, mesh);
        if self.share_instances {
            self.prototypes.insert(prop.name, obstacle.clone());
        }
        Ok(obstacle)
    }

    fn place_prop(
        &mut self,
        ctx: &mut EngineContext,
        prop: &'static PropDescriptor,
        x: usize,
        y: usize,
        entry: &CellEntry,
    ) -> Result<(), LevelError> {
        let mut obstacle = self.new_obstacle(ctx, prop)?;

        let size = prop.body_size_for(obstacle.object(), obstacle.pbody_size());
        obstacle.set_pbody_size(size);

        let placement = entry.transform();
        let position = cell_position(x, y) + placement.offset;
        let object = obstacle.object_mut();
        object.set_position(position);
        object.set_rotation(Vec3::new(90.0, 0.0, placement.rotation_z.unwrap_or(0.0)));

        let mut body = PhysicsBody::new_box(Vec3::zeros(), size);
        body.set_local_position(Vec3::new(0.0, 0.0, prop.body_z));
        if placement.rotation_z.is_some() {
            body.set_local_rotation(Vec3::new(prop.spin_body_rotation_x, 0.0, 0.0));
        }
        object.add_physics_body(body);
        obstacle.set_draw_pbody(self.show_physics_bodies);

        if prop.emits_light {
            if let Some(lights) = ctx.lists.lights.get_scene_light_list_by_name_mut(&self.scene_name) {
                lights.add_light(props::lamp_light(&self.scene_name, position));
            }
        }

        let id = object_list(ctx, &self.scene_name)?.add_object(Box::new(obstacle));
        self.objects.push(id);
        self.obstacles.push(id);
        Ok(())
    }
}

fn object_list<'a>(ctx: &'a mut EngineContext, scene: &str) -> Result<&'a mut ObjectList, LevelError> {
    ctx.lists
        .objects
        .get_scene_object_list_by_name_mut(scene)
        .ok_or_else(|| LevelError::MissingObjectList(scene.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scene_engine::assets::InMemoryMeshSource;
    use scene_engine::core::config::ApplicationConfig;
    use scene_engine::render::Mesh;
    use scene_engine::scene::Entity;

    use crate::config::SourceConfig;
    use crate::scenes::GameplayScene;

    const LEGEND: &str = "Legend,Symbol,Name\n,W,Wall\n,O,Origin\n,L,Lamp post\n,Q,Mystery\n,D,Dumpster\n";

    fn context() -> EngineContext {
        let source = InMemoryMeshSource::new().with_fallback(Mesh::cuboid(Vec3::new(2.0, 1.0, 3.0)));
        EngineContext::with_mesh_source(ApplicationConfig::default(), Box::new(source))
    }

    fn level(map: &str) -> Level {
        Level::from_readers(LEGEND.as_bytes(), map.as_bytes(), "alley", 1).unwrap()
    }

    fn sources() -> SourceRegistry {
        SourceRegistry::with_seed(SourceConfig::default(), 42)
    }

    #[test]
    fn test_generate_places_props_and_player() {
        let mut ctx = context();
        let mut sources = sources();
        let mut level = level("map,3x1\n,O,Q,W~(0_1_0)~90\n");
        let count = level.generate_objects(&mut ctx, &mut sources).unwrap().len();
        assert_eq!(count, 2);
        assert_eq!(level.obstacles().len(), 1);
        assert!(level.objects_generated());

        // Row mirrored: "W" lands in column 0, "O" in column 2
        assert_eq!(level.player_spawn_index(), Some((0, 2)));
        assert_relative_eq!(level.player_spawn_position(), Vec3::new(12.5, 0.0, 0.0));

        let list = ctx.lists.objects.get_scene_object_list_by_name("alley").unwrap();
        let wall = list.get_as::<Obstacle>(level.obstacles()[0]).unwrap();
        assert_relative_eq!(wall.object().position(), Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(wall.object().rotation(), Vec3::new(90.0, 0.0, 90.0));
        assert_eq!(wall.pbody_size(), Vec3::new(2.0, 3.0, 1.0));

        let body = &wall.object().physics_bodies()[0];
        assert_relative_eq!(body.local_position(), Vec3::new(0.0, 0.0, 2.0));
        assert_relative_eq!(body.local_rotation(), Vec3::new(90.0, 0.0, 0.0));
        assert!(!body.is_visible());

        let player = list.get_as::<Player>(level.player().unwrap()).unwrap();
        assert_eq!(player.object().scene_name(), "alley");
        assert!(sources.is_generated());
    }

    #[test]
    fn test_lamp_adds_light() {
        let mut ctx = context();
        let mut level = level("map,1x1\n,L~(1_0_0)\n");
        level.generate_objects(&mut ctx, &mut sources()).unwrap();

        let lights = ctx.lists.lights.get_scene_light_list_by_name("alley").unwrap();
        assert_eq!(lights.light_count(), 1);
        let light = &lights.lights()[0];
        assert_relative_eq!(light.position, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(light.specular_power, 0.7);

        let list = ctx.lists.objects.get_scene_object_list_by_name("alley").unwrap();
        let lamp = list.get_as::<Obstacle>(level.obstacles()[0]).unwrap();
        assert_eq!(lamp.pbody_size(), crate::entities::obstacle::default_pbody_size());
        assert_relative_eq!(lamp.object().physics_bodies()[0].local_rotation(), Vec3::zeros());
    }

    #[test]
    fn test_no_origin_still_creates_player() {
        let mut ctx = context();
        let mut level = level("map,1x1\n,W\n");
        level.generate_objects(&mut ctx, &mut sources()).unwrap();
        let id = level.player().unwrap();
        assert!(level.objects().contains(&id));
        assert_eq!(level.player_spawn_index(), None);

        let list = ctx.lists.objects.get_scene_object_list_by_name("alley").unwrap();
        assert_eq!(list.get(id).unwrap().object().position(), Vec3::zeros());
    }

    #[test]
    fn test_second_generation_is_noop() {
        let mut ctx = context();
        let mut sources = sources();
        let mut level = level("map,2x1\n,W,O\n");
        let first = level.generate_objects(&mut ctx, &mut sources).unwrap().to_vec();
        let second = level.generate_objects(&mut ctx, &mut sources).unwrap().to_vec();
        assert_eq!(first, second);
        assert_eq!(ctx.lists.objects.get_scene_object_list_by_name("alley").unwrap().len(), 2);
    }

    #[test]
    fn test_shared_instances_are_deep_copies() {
        let mut ctx = context();
        let mut level = level("map,2x1\n,W~90,W\n").with_instance_sharing(true);
        level.generate_objects(&mut ctx, &mut sources()).unwrap();
        assert_eq!(level.prototypes.len(), 1);

        let list = ctx.lists.objects.get_scene_object_list_by_name("alley").unwrap();
        let [a, b] = level.obstacles() else {
            panic!("expected two obstacles");
        };
        let a = list.get_as::<Obstacle>(*a).unwrap();
        let b = list.get_as::<Obstacle>(*b).unwrap();
        assert_eq!(a.object().physics_bodies().len(), 1);
        assert_eq!(b.object().physics_bodies().len(), 1);
        assert_ne!(a.object().position(), b.object().position());
        assert_ne!(a.object().rotation(), b.object().rotation());
    }

    #[test]
    fn test_missing_mesh_is_an_error() {
        let mut ctx = EngineContext::with_mesh_source(ApplicationConfig::default(), Box::new(InMemoryMeshSource::new()));
        let mut level = level("map,1x1\n,W\n");
        let result = level.generate_objects(&mut ctx, &mut sources());
        assert!(matches!(result, Err(LevelError::Asset(_))));
        assert!(!level.objects_generated());
    }

    #[test]
    fn test_failed_generation_leaves_scene_clean() {
        let cube = Mesh::cuboid(Vec3::new(2.0, 1.0, 3.0));
        let source = InMemoryMeshSource::new()
            .with_mesh(props::find_prop("Wall").unwrap().mesh_path, cube.clone())
            .with_mesh(props::find_prop("Lamp post").unwrap().mesh_path, cube);
        let mut ctx = EngineContext::with_mesh_source(ApplicationConfig::default(), Box::new(source));
        let mut sources = sources();

        // Mirrored: wall and lamp are placed before the dumpster fails
        let mut level = level("map,3x1\n,D,L,W\n");
        for _ in 0..2 {
            let result = level.generate_objects(&mut ctx, &mut sources);
            assert!(matches!(result, Err(LevelError::Asset(_))));
            assert!(level.objects().is_empty());
            assert!(level.obstacles().is_empty());
            assert!(level.player().is_none());
            assert!(!level.objects_generated());
            assert!(ctx.lists.objects.get_scene_object_list_by_name("alley").unwrap().is_empty());
            assert_eq!(ctx.lists.lights.get_scene_light_list_by_name("alley").unwrap().light_count(), 0);
        }
    }

    #[test]
    fn test_reopened_scene_is_generated_again() {
        let mut ctx = context();
        let mut sources = sources();
        ctx.scenes
            .register_scene("alley", Some(Box::new(GameplayScene::new())))
            .unwrap();
        ctx.scenes.register_scene("menu", None).unwrap();
        assert!(ctx.set_current_scene("alley"));

        let mut level = level("map,3x1\n,O,L,W\n");
        let first = level.generate_objects(&mut ctx, &mut sources).unwrap().len();
        assert_eq!(first, 3);

        assert!(ctx.set_current_scene("menu"));
        assert!(ctx.set_current_scene("alley"));
        let ids = level.generate_objects(&mut ctx, &mut sources).unwrap().to_vec();
        assert_eq!(ids.len(), 3);
        assert!(level.objects_generated());
        assert_eq!(level.player_spawn_index(), Some((0, 2)));

        let list = ctx.lists.objects.get_scene_object_list_by_name("alley").unwrap();
        assert_eq!(list.len(), 3);
        assert!(ids.iter().all(|id| list.contains(*id)));
        assert!(list.get_as::<Player>(level.player().unwrap()).is_some());
        assert_eq!(ctx.lists.lights.get_scene_light_list_by_name("alley").unwrap().light_count(), 1);
    }

    #[test]
    fn test_debug_draw_bodies() {
        let mut ctx = context();
        let mut level = level("map,1x1\n,W\n").with_physics_bodies_visible(true);
        level.generate_objects(&mut ctx, &mut sources()).unwrap();
        let list = ctx.lists.objects.get_scene_object_list_by_name("alley").unwrap();
        let wall = list.get_as::<Obstacle>(level.obstacles()[0]).unwrap();
        assert!(wall.draw_pbody());
        assert!(wall.object().physics_bodies()[0].is_visible());
    }
}
