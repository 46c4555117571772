//! Enemy combat AI: line of sight, reaction gating, fire control
//!
//! Enemies hold position (or pursue, when tuned to) and may only fire
//! after `enemy_reaction_time` ticks of continuous, unbroken sight of the
//! player. Any single tick of broken sight resets the timer in full.

use glam::Vec2;
use rand::Rng;

use super::movement::step_with_rollback;
use super::state::{Bullet, BulletSource, GameEvent, SessionState};
use crate::consts::ENEMY_GUN_OFFSET;
use crate::map::TileGrid;
use crate::{angle_degrees, rotate_degrees};

/// Whether a straight segment between two points is clear of walls
///
/// Samples at unit-length steps along the segment; a single wall sample
/// breaks sight. Out-of-grid samples are open, consistent with
/// [`TileGrid::is_wall`].
pub fn line_of_sight(grid: &TileGrid, from: Vec2, to: Vec2) -> bool {
    let delta = to - from;
    let distance = delta.length();
    if distance < 1.0 {
        return true;
    }
    let dir = delta / distance;

    let mut traveled = 0.0;
    while traveled < distance {
        let sample = from + dir * traveled;
        if grid.is_wall(sample.x, sample.y) {
            return false;
        }
        traveled += 1.0;
    }
    true
}

/// Run the enemy phase of one tick
pub fn update_enemies(state: &mut SessionState) {
    let player_pos = state.registry.player.pos;
    // Deferred so bullet spawns don't alias the enemy iteration
    let mut pending_shots: Vec<(Vec2, f32)> = Vec::new();

    for i in 0..state.registry.enemies.len() {
        if state.registry.enemies[i].is_dead {
            continue;
        }

        // Pursuit: normalized direction, never overshooting the player
        if state.tuning.pursuit {
            let enemy_pos = state.registry.enemies[i].pos;
            let to_player = player_pos - enemy_pos;
            let distance = to_player.length();
            if distance > 0.0 {
                let step = to_player / distance * distance.min(state.tuning.enemy_speed);
                state.registry.enemies[i].pos =
                    step_with_rollback(enemy_pos, step, &state.grid);
            }
        }

        let enemy_pos = state.registry.enemies[i].pos;
        let sighted = line_of_sight(&state.grid, enemy_pos, player_pos);

        if sighted {
            let enemy = &mut state.registry.enemies[i];
            if enemy.reaction_timer > 0 {
                enemy.reaction_timer -= 1;
            }
            if enemy.reaction_timer == 0 {
                enemy.aim_angle = angle_degrees(player_pos - enemy_pos);
                if enemy.shoot_cooldown == 0 {
                    enemy.shoot_cooldown = state.tuning.enemy_shoot_cooldown;
                    let muzzle = enemy_pos + rotate_degrees(ENEMY_GUN_OFFSET, enemy.aim_angle);
                    let aim = enemy.aim_angle;
                    if !state.grid.is_wall(muzzle.x, muzzle.y) {
                        pending_shots.push((muzzle, aim));
                    }
                }
            }
        } else {
            // Sight loss forgives no partial progress
            state.registry.enemies[i].reaction_timer = state.tuning.enemy_reaction_time;
        }

        let enemy = &mut state.registry.enemies[i];
        if enemy.shoot_cooldown > 0 {
            enemy.shoot_cooldown -= 1;
        }
    }

    for (muzzle, angle) in pending_shots {
        let spread = state
            .rng
            .random_range(-state.tuning.bullet_spread..=state.tuning.bullet_spread);
        let id = state.registry.next_entity_id();
        let bullet = Bullet::new(
            id,
            muzzle,
            angle + spread,
            state.tuning.bullet_speed,
            state.tuning.bullet_lifetime,
            state.time_ticks,
            BulletSource::Enemy,
        );
        state.registry.spawn_bullet(bullet);
        state.push_event(GameEvent::ShotFired {
            source: BulletSource::Enemy,
        });
    }
}
