//! Bullet flight and combat resolution
//!
//! Velocity is fixed at spawn (straight-ray trajectory); per tick a bullet
//! integrates, expires after its lifetime, dies on wall contact, or
//! resolves against the first valid target in stable id order. At most one
//! effect per bullet, and a bullet never damages its own source class.

use rand::Rng;

use super::state::{affects, GameEvent, SessionState, TargetKind};

/// Run the bullet phase of one tick
pub fn update_bullets(state: &mut SessionState) {
    // Index snapshot: nothing spawns bullets during this phase
    for i in 0..state.registry.bullets.len() {
        if !state.registry.bullets[i].alive {
            continue;
        }

        // Integrate
        let new_pos = state.registry.bullets[i].pos + state.registry.bullets[i].vel;
        state.registry.bullets[i].pos = new_pos;

        // Lifetime expiry, regardless of travel
        let age = state.time_ticks.saturating_sub(state.registry.bullets[i].spawn_tick);
        if age >= state.registry.bullets[i].lifetime as u64 {
            state.registry.bullets[i].alive = false;
            continue;
        }

        // Wall contact
        if state.grid.is_wall(new_pos.x, new_pos.y) {
            state.registry.bullets[i].alive = false;
            continue;
        }

        resolve_targets(state, i);
    }

    state.registry.bullets.retain(|b| b.alive);
}

/// Scan live targets in stable order (enemies by id, then the player);
/// the first overlap consumes the bullet
fn resolve_targets(state: &mut SessionState, bullet_idx: usize) {
    let source = state.registry.bullets[bullet_idx].source;
    let hitbox = state.registry.bullets[bullet_idx].hitbox();

    if affects(source, TargetKind::Enemy) {
        for j in 0..state.registry.enemies.len() {
            let enemy = &state.registry.enemies[j];
            if enemy.is_dead || !hitbox.overlaps(&enemy.hitbox()) {
                continue;
            }
            kill_enemy(state, j);
            state.registry.bullets[bullet_idx].alive = false;
            return;
        }
    }

    if affects(source, TargetKind::Player)
        && state.registry.player.alive
        && hitbox.overlaps(&state.registry.player.hitbox())
    {
        state.registry.player.alive = false;
        state.registry.bullets[bullet_idx].alive = false;
        state.push_event(GameEvent::PlayerKilled);
        log::info!("Player killed at tick {}", state.time_ticks);
    }
}

/// Apply the alive -> dead transition and roll for a weapon drop
fn kill_enemy(state: &mut SessionState, enemy_idx: usize) {
    let pos = {
        let enemy = &mut state.registry.enemies[enemy_idx];
        enemy.kill();
        enemy.pos
    };
    state.push_event(GameEvent::EnemyKilled { pos });

    if state.rng.random_range(1..=100) <= state.tuning.drop_chance {
        state.registry.spawn_drop(pos);
        state.push_event(GameEvent::WeaponDropped { pos });
    }
}
