//! Enemies

use std::fmt;
use std::sync::Arc;

use scene_engine::foundation::math::Vec3;
use scene_engine::physics::PhysicsBody;
use scene_engine::render::Mesh;
use scene_engine::scene::{Object, ObjectFlags};

use super::impl_entity;

/// Enemy kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyType {
    /// Melee brawler
    Marauder,
    /// Caster
    Oracle,
    /// Archer; fires arrows
    Sentry,
    /// Heavy tank
    Bastion,
    /// Fast crawler
    Mechaspider,
}

impl EnemyType {
    /// Every enemy type in source-generation order
    pub const ALL: [Self; 5] = [Self::Sentry, Self::Oracle, Self::Marauder, Self::Bastion, Self::Mechaspider];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Marauder => "Marauder",
            Self::Oracle => "Oracle",
            Self::Sentry => "Sentry",
            Self::Bastion => "Bastion",
            Self::Mechaspider => "Mechaspider",
        }
    }

    /// Whether this type attacks with projectiles
    pub fn uses_projectiles(self) -> bool {
        matches!(self, Self::Sentry)
    }
}

impl fmt::Display for EnemyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an enemy is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyState {
    /// Waiting
    #[default]
    Idle,
    /// Moving toward the player
    Chasing,
    /// Attacking
    Attacking,
}

/// A hostile character
#[derive(Debug, Clone)]
pub struct Enemy {
    object: Object,
    kind: EnemyType,
    state: EnemyState,
    alive: bool,
    stun_timer: f32,
    pbody_size: Vec3,
    use_projectiles: bool,
    proj_charge_timer: f32,
    proj_charge_time_max: f32,
    proj_timer_factor: f32,
    speed_multiplier: f32,
    points: u32,
    walk_animation: Option<usize>,
    attack_animation: Option<usize>,
}

impl Enemy {
    /// Wrap `object` as an enemy of `kind`
    pub fn new(kind: EnemyType, object: Object) -> Self {
        Self {
            object,
            kind,
            state: EnemyState::Idle,
            alive: true,
            stun_timer: 0.0,
            pbody_size: Vec3::new(1.0, 2.0, 1.0),
            use_projectiles: kind.uses_projectiles(),
            proj_charge_timer: 0.0,
            proj_charge_time_max: 1.0,
            proj_timer_factor: 1.0,
            speed_multiplier: 10.0,
            points: 1,
            walk_animation: None,
            attack_animation: None,
        }
    }

    /// Enemy displaying `mesh`, with its default physics body attached
    pub fn from_mesh(kind: EnemyType, scene: &str, mesh_path: &str, mesh: Arc<Mesh>) -> Self {
        let mut enemy = Self::new(kind, Object::with_mesh(kind.name(), scene, mesh_path, mesh));
        let mut body = PhysicsBody::new_box(Vec3::zeros(), enemy.pbody_size);
        body.set_local_position(Vec3::new(0.0, 0.0, 1.0));
        body.set_visible(false);
        enemy.object.add_physics_body(body);
        enemy
    }

    /// Enemy type
    pub fn kind(&self) -> EnemyType {
        self.kind
    }

    /// Underlying object
    pub fn object(&self) -> &Object {
        &self.object
    }

    /// Underlying object, mutably
    pub fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }

    /// Current behavior state
    pub fn state(&self) -> EnemyState {
        self.state
    }

    /// Change behavior state
    pub fn set_state(&mut self, state: EnemyState) {
        self.state = state;
    }

    /// Whether the enemy is alive
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark the enemy dead
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Stun for `seconds`; a longer remaining stun is kept
    pub fn stun(&mut self, seconds: f32) {
        self.stun_timer = self.stun_timer.max(seconds);
    }

    /// Whether the enemy is stunned
    pub fn is_stunned(&self) -> bool {
        self.stun_timer > 0.0
    }

    /// Seconds of stun left
    pub fn stun_timer(&self) -> f32 {
        self.stun_timer
    }

    /// Physics body size hint
    pub fn pbody_size(&self) -> Vec3 {
        self.pbody_size
    }

    /// First attached physics body
    pub fn primary_physics_body(&self) -> Option<&PhysicsBody> {
        self.object.physics_bodies().first()
    }

    /// Whether physics bodies are debug-drawn
    pub fn draw_pbody(&self) -> bool {
        self.object.flags().contains(ObjectFlags::DRAW_BODIES)
    }

    /// Debug-draw physics bodies or not
    pub fn set_draw_pbody(&mut self, draw: bool) {
        self.object.set_flags(ObjectFlags::DRAW_BODIES, draw);
        for index in 0..self.object.physics_bodies().len() {
            if let Some(body) = self.object.physics_body_mut(index) {
                body.set_visible(draw);
            }
        }
    }

    /// Whether this enemy fires projectiles
    pub fn is_using_projectiles(&self) -> bool {
        self.use_projectiles
    }

    /// Enable or disable projectile attacks
    pub fn set_using_projectiles(&mut self, enabled: bool) {
        self.use_projectiles = enabled;
    }

    /// Whether a projectile is fully charged
    pub fn projectile_available(&self) -> bool {
        self.use_projectiles && self.proj_charge_timer >= self.proj_charge_time_max
    }

    /// Charge accumulated toward the next projectile
    pub fn current_projectile_charge(&self) -> f32 {
        self.proj_charge_timer
    }

    /// Charge needed for a projectile
    pub fn maximum_projectile_charge_time(&self) -> f32 {
        self.proj_charge_time_max
    }

    /// Set the charge needed for a projectile; non-positive values are rejected
    pub fn set_maximum_projectile_charge_time(&mut self, seconds: f32) -> bool {
        if seconds <= 0.0 {
            return false;
        }
        self.proj_charge_time_max = seconds;
        true
    }

    /// Rate multiplier applied while charging
    pub fn projectile_charge_factor(&self) -> f32 {
        self.proj_timer_factor
    }

    /// Set the charge rate multiplier; non-positive values are rejected
    pub fn set_projectile_charge_factor(&mut self, factor: f32) -> bool {
        if factor <= 0.0 {
            return false;
        }
        self.proj_timer_factor = factor;
        true
    }

    /// Reset the charge after firing, whether or not it was full
    pub fn projectile_fired(&mut self) {
        self.proj_charge_timer = 0.0;
    }

    /// Points awarded for the kill
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Set the points awarded for the kill
    pub fn set_points(&mut self, points: u32) {
        self.points = points;
    }

    /// Movement speed multiplier
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Set the movement speed multiplier; non-positive values are rejected
    pub fn set_speed_multiplier(&mut self, multiplier: f32) -> bool {
        if multiplier <= 0.0 {
            log::warn!("Rejected speed multiplier {multiplier} for {}", self.kind);
            return false;
        }
        self.speed_multiplier = multiplier;
        true
    }

    /// Index of the walk animation in the animation manager
    pub fn walk_animation_index(&self) -> Option<usize> {
        self.walk_animation
    }

    /// Index of the attack animation in the animation manager
    pub fn attack_animation_index(&self) -> Option<usize> {
        self.attack_animation
    }

    /// Record which animations walk and attack
    pub fn set_animation_indices(&mut self, walk: Option<usize>, attack: Option<usize>) {
        self.walk_animation = walk;
        self.attack_animation = attack;
    }

    /// Turn to face `target` in the ground plane
    pub fn face_towards(&mut self, target: Vec3) {
        let d = target - self.object.position();
        if d.x == 0.0 && d.y == 0.0 {
            return;
        }
        let mut rotation = self.object.rotation();
        rotation.z = d.y.atan2(d.x).to_degrees();
        self.object.set_rotation(rotation);
    }

    fn tick(&mut self, delta_time: f32) {
        self.object.update(delta_time);
        if self.stun_timer > 0.0 {
            self.stun_timer = (self.stun_timer - delta_time).max(0.0);
            return;
        }
        if self.alive && self.use_projectiles {
            self.proj_charge_timer = (self.proj_charge_timer + delta_time * self.proj_timer_factor)
                .min(self.proj_charge_time_max);
        }
    }
}

impl_entity!(Enemy);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scene_engine::scene::Entity;

    fn sentry() -> Enemy {
        Enemy::from_mesh(EnemyType::Sentry, "level", "sentry.obj", Arc::new(Mesh::cuboid(Vec3::new(1.0, 1.0, 2.0))))
    }

    #[test]
    fn test_defaults() {
        let enemy = sentry();
        assert_eq!(enemy.pbody_size(), Vec3::new(1.0, 2.0, 1.0));
        assert_relative_eq!(enemy.speed_multiplier(), 10.0);
        assert_eq!(enemy.points(), 1);
        assert!(enemy.is_using_projectiles());
        assert_eq!(enemy.primary_physics_body().unwrap().local_position(), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_speed_multiplier_must_be_positive() {
        let mut enemy = sentry();
        assert!(!enemy.set_speed_multiplier(0.0));
        assert!(!enemy.set_speed_multiplier(-2.0));
        assert!(enemy.set_speed_multiplier(4.0));
        assert_relative_eq!(enemy.speed_multiplier(), 4.0);
    }

    #[test]
    fn test_projectile_charge_cycle() {
        let mut enemy = sentry();
        enemy.set_projectile_charge_factor(2.0);
        enemy.update(0.25);
        assert!(!enemy.projectile_available());
        enemy.update(0.5);
        assert!(enemy.projectile_available());
        assert_relative_eq!(enemy.current_projectile_charge(), 1.0);
        enemy.projectile_fired();
        assert_relative_eq!(enemy.current_projectile_charge(), 0.0);
    }

    #[test]
    fn test_stun_pauses_charging() {
        let mut enemy = sentry();
        enemy.stun(0.5);
        enemy.update(0.25);
        assert!(enemy.is_stunned());
        enemy.update(0.25);
        assert!(!enemy.is_stunned());
        assert_relative_eq!(enemy.current_projectile_charge(), 0.0);
    }

    #[test]
    fn test_melee_types_never_charge() {
        let mut enemy = Enemy::new(EnemyType::Bastion, Object::new("bastion", "level"));
        enemy.update(5.0);
        assert!(!enemy.projectile_available());
    }

    #[test]
    fn test_face_towards() {
        let mut enemy = sentry();
        enemy.face_towards(Vec3::new(0.0, 3.0, 0.0));
        assert_relative_eq!(enemy.object().rotation().z, 90.0, epsilon = 1e-4);
    }
}
