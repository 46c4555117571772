//! Entity data model and session state
//!
//! Everything the simulation mutates per tick lives here. Angles are in
//! degrees, velocities in world units per tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::registry::EntityRegistry;
use crate::config::Tuning;
use crate::consts::*;
use crate::map::TileGrid;
use crate::vec_from_degrees;

/// Axis-aligned collision rectangle, independent of sprite bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Degenerate rectangle that overlaps nothing (dead entities)
    pub const ZERO: Rect = Rect {
        min: Vec2::ZERO,
        max: Vec2::ZERO,
    };

    /// Rectangle of the given size centered on a point
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// AABB overlap test; zero-size rectangles never overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Point containment, half-open on the max edge
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }
}

/// Which side fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletSource {
    Player,
    Enemy,
}

/// Behavior tag carried by collidable entities, used by the bullet
/// dispatch table instead of type-identity checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Player,
    Enemy,
}

/// Whether a bullet from `source` affects a target of `kind`
///
/// A bullet never damages its own source class.
#[inline]
pub fn affects(source: BulletSource, kind: TargetKind) -> bool {
    matches!(
        (source, kind),
        (BulletSource::Player, TargetKind::Enemy) | (BulletSource::Enemy, TargetKind::Player)
    )
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Aim angle in degrees, from the cursor relative to screen center
    pub aim_angle: f32,
    pub ammo: u32,
    /// Ticks until the next shot is allowed
    pub shoot_cooldown: u32,
    pub alive: bool,
}

impl Player {
    pub fn new(pos: Vec2, ammo: u32) -> Self {
        Self {
            pos,
            aim_angle: 0.0,
            ammo,
            shoot_cooldown: 0,
            alive: true,
        }
    }

    /// Fixed 80x80 hitbox centered on the movement position
    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, PLAYER_HITBOX)
    }
}

/// An AI-controlled enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub aim_angle: f32,
    /// Ticks of continuous sight still required before firing
    pub reaction_timer: u32,
    pub shoot_cooldown: u32,
    pub is_dead: bool,
    /// Facing angle frozen at the moment of death, for the dead sprite
    pub death_angle: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, reaction_time: u32) -> Self {
        Self {
            id,
            pos,
            aim_angle: 0.0,
            reaction_timer: reaction_time,
            shoot_cooldown: 0,
            is_dead: false,
            death_angle: 0.0,
        }
    }

    /// Collision rectangle; collapses to nothing once dead
    pub fn hitbox(&self) -> Rect {
        if self.is_dead {
            Rect::ZERO
        } else {
            Rect::centered(self.pos, ENEMY_HITBOX)
        }
    }

    /// The one-way alive -> dead transition
    pub fn kill(&mut self) {
        self.is_dead = true;
        self.death_angle = self.aim_angle;
    }
}

/// A projectile in flight
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Fixed at spawn; a bullet flies a straight ray
    pub vel: Vec2,
    pub spawn_tick: u64,
    /// Ticks of flight before expiry
    pub lifetime: u32,
    pub source: BulletSource,
    pub alive: bool,
}

impl Bullet {
    /// Spawn a bullet; `angle` must already include the spread offset
    pub fn new(
        id: u32,
        pos: Vec2,
        angle: f32,
        speed: f32,
        lifetime: u32,
        spawn_tick: u64,
        source: BulletSource,
    ) -> Self {
        Self {
            id,
            pos,
            vel: vec_from_degrees(angle) * speed,
            spawn_tick,
            lifetime,
            source,
            alive: true,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, BULLET_HITBOX)
    }
}

/// A weapon dropped by a dead enemy, static until picked up
#[derive(Debug, Clone)]
pub struct DroppedWeapon {
    pub id: u32,
    pub pos: Vec2,
}

impl DroppedWeapon {
    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, DROP_HITBOX)
    }
}

/// One-shot feedback signals for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ShotFired { source: BulletSource },
    /// Drives the crosshair kill marker
    EnemyKilled { pos: Vec2 },
    WeaponDropped { pos: Vec2 },
    AmmoPickedUp { ammo: u32 },
    PlayerKilled,
}

/// Tri-state session result, re-evaluated each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Running,
    PlayerDead,
    /// Player overlaps the exit tile with no enemies remaining
    StageCleared,
}

/// Complete session state (deterministic for a given seed, map and inputs)
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub grid: TileGrid,
    pub tuning: Tuning,
    pub registry: EntityRegistry,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub outcome: SessionOutcome,
    events: Vec<GameEvent>,
}

impl SessionState {
    pub fn new(grid: TileGrid, tuning: Tuning, seed: u64) -> Self {
        let registry = EntityRegistry::seeded(&grid, &tuning);
        log::info!(
            "Session started: seed={}, {} enemies",
            seed,
            registry.enemies.len()
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            grid,
            tuning,
            registry,
            time_ticks: 0,
            outcome: SessionOutcome::Running,
            events: Vec::new(),
        }
    }

    /// Full-session restart: clears every group, re-seeds entities from the
    /// map spawn markers, and rewinds the clock and RNG
    pub fn reset(&mut self) {
        self.registry.reset(&self.grid, &self.tuning);
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.time_ticks = 0;
        self.outcome = SessionOutcome::Running;
        self.events.clear();
        log::info!("Session reset");
    }

    /// Elapsed play time in milliseconds at the fixed tick rate
    pub fn elapsed_ms(&self) -> f64 {
        self.time_ticks as f64 * MS_PER_TICK
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain buffered events for the presentation layer
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::centered(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::centered(Vec2::new(8.0, 0.0), Vec2::splat(10.0));
        let c = Rect::centered(Vec2::new(20.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_zero_rect_overlaps_nothing() {
        let a = Rect::centered(Vec2::ZERO, Vec2::splat(100.0));
        assert!(!a.overlaps(&Rect::ZERO));
        assert!(!Rect::ZERO.overlaps(&a));
        assert!(!Rect::ZERO.contains_point(Vec2::ZERO));
    }

    #[test]
    fn test_affects_source_exclusivity() {
        assert!(affects(BulletSource::Player, TargetKind::Enemy));
        assert!(affects(BulletSource::Enemy, TargetKind::Player));
        assert!(!affects(BulletSource::Player, TargetKind::Player));
        assert!(!affects(BulletSource::Enemy, TargetKind::Enemy));
    }

    #[test]
    fn test_dead_enemy_hitbox_degenerate() {
        let mut enemy = Enemy::new(1, Vec2::new(100.0, 100.0), 30);
        enemy.aim_angle = 42.0;
        assert!(enemy.hitbox().overlaps(&Rect::centered(enemy.pos, Vec2::splat(4.0))));
        enemy.kill();
        assert_eq!(enemy.hitbox(), Rect::ZERO);
        assert_eq!(enemy.death_angle, 42.0);
    }

    #[test]
    fn test_bullet_velocity_fixed_at_spawn() {
        let bullet = Bullet::new(1, Vec2::ZERO, 0.0, 30.0, 45, 0, BulletSource::Player);
        assert!((bullet.vel - Vec2::new(30.0, 0.0)).length() < 1e-4);
    }
}
