//! Player controller: input to velocity, aim, fire control, pickups

use glam::Vec2;
use rand::Rng;

use super::movement::{step_with_rollback, velocity_from_input};
use super::state::{Bullet, BulletSource, GameEvent, SessionState};
use super::tick::TickInput;
use crate::consts::*;
use crate::{angle_degrees, rotate_degrees};

/// Run the player phase of one tick
pub fn update_player(state: &mut SessionState, input: &TickInput) {
    if !state.registry.player.alive {
        return;
    }

    // Movement with wall rollback
    let velocity = velocity_from_input(input, state.tuning.player_speed);
    state.registry.player.pos =
        step_with_rollback(state.registry.player.pos, velocity, &state.grid);

    // Aim at the cursor relative to screen center; the camera keeps the
    // player centered so this is the world-space aim direction too
    let to_cursor = input.cursor - Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
    state.registry.player.aim_angle = angle_degrees(to_cursor);

    collect_pickups(state);
    try_fire(state, input);

    if state.registry.player.shoot_cooldown > 0 {
        state.registry.player.shoot_cooldown -= 1;
    }
}

/// Pick up any dropped weapon the player overlaps and restore ammo
fn collect_pickups(state: &mut SessionState) {
    let hitbox = state.registry.player.hitbox();
    let picked: Vec<u32> = state
        .registry
        .drops
        .iter()
        .filter(|d| hitbox.overlaps(&d.hitbox()))
        .map(|d| d.id)
        .collect();

    for id in picked {
        state.registry.despawn(id);
        let ammo = state.tuning.ammo_after_pickup(state.registry.player.ammo);
        state.registry.player.ammo = ammo;
        state.push_event(GameEvent::AmmoPickedUp { ammo });
    }
}

/// Attempt a shot: requires held fire input, a cold gun and ammo
///
/// Cooldown and ammo are spent on the attempt; the bullet itself only
/// spawns if the muzzle point is clear of walls, which stops firing into
/// geometry the player is pressed against. Zero ammo silently suppresses
/// the whole attempt.
fn try_fire(state: &mut SessionState, input: &TickInput) {
    let player = &state.registry.player;
    if !(input.fire && player.shoot_cooldown == 0 && player.ammo > 0) {
        return;
    }

    let aim = player.aim_angle;
    let muzzle = player.pos + rotate_degrees(GUN_OFFSET, aim);

    state.registry.player.shoot_cooldown = state.tuning.shoot_cooldown;
    state.registry.player.ammo -= 1;

    if state.grid.is_wall(muzzle.x, muzzle.y) {
        return;
    }

    let spread = state
        .rng
        .random_range(-state.tuning.bullet_spread..=state.tuning.bullet_spread);
    let id = state.registry.next_entity_id();
    let bullet = Bullet::new(
        id,
        muzzle,
        aim + spread,
        state.tuning.bullet_speed,
        state.tuning.bullet_lifetime,
        state.time_ticks,
        BulletSource::Player,
    );
    state.registry.spawn_bullet(bullet);
    state.push_event(GameEvent::ShotFired {
        source: BulletSource::Player,
    });
}
