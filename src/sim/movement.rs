//! Shared move-with-collision-rollback algorithm
//!
//! Used by the player and by pursuing enemies. Collision is resolved by
//! rolling back the whole move when the hitbox center lands in a wall;
//! there is no axis-separated sliding, so moving diagonally into a corner
//! blocks completely. Known limitation, kept from the original design.

use glam::Vec2;

use super::tick::TickInput;
use crate::map::TileGrid;

/// Per-tick velocity from four-directional key state
///
/// When two perpendicular axes are held the contribution of each is scaled
/// by 1/sqrt(2), so diagonal speed equals straight-line speed.
pub fn velocity_from_input(input: &TickInput, speed: f32) -> Vec2 {
    let mut vel = Vec2::ZERO;
    if input.up {
        vel.y = -speed;
    }
    if input.down {
        vel.y = speed;
    }
    if input.left {
        vel.x = -speed;
    }
    if input.right {
        vel.x = speed;
    }

    if vel.x != 0.0 && vel.y != 0.0 {
        vel *= std::f32::consts::FRAC_1_SQRT_2;
    }
    vel
}

/// Apply one tick of movement with wall rollback
///
/// The tentative position is `pos + velocity`; if the hitbox center there
/// resolves to a wall tile the actor stays exactly where it was.
pub fn step_with_rollback(pos: Vec2, velocity: Vec2, grid: &TileGrid) -> Vec2 {
    let tentative = pos + velocity;
    if grid.is_wall(tentative.x, tentative.y) {
        pos
    } else {
        tentative
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TILE_SIZE;
    use proptest::prelude::*;

    fn input(up: bool, down: bool, left: bool, right: bool) -> TickInput {
        TickInput {
            up,
            down,
            left,
            right,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_axis_speed() {
        let vel = velocity_from_input(&input(false, false, false, true), 6.0);
        assert_eq!(vel, Vec2::new(6.0, 0.0));
        let vel = velocity_from_input(&input(true, false, false, false), 6.0);
        assert_eq!(vel, Vec2::new(0.0, -6.0));
    }

    #[test]
    fn test_diagonal_magnitude_equals_straight() {
        let straight = velocity_from_input(&input(false, false, false, true), 6.0);
        let diagonal = velocity_from_input(&input(true, false, false, true), 6.0);
        assert!((diagonal.length() - straight.length()).abs() < 1e-4);
    }

    #[test]
    fn test_opposed_keys_cancel() {
        let vel = velocity_from_input(&input(true, true, true, true), 6.0);
        assert_eq!(vel, Vec2::ZERO);
    }

    #[test]
    fn test_rollback_into_wall() {
        let grid = crate::map::TileGrid::parse("###\n#.#\n###").unwrap();
        // Center of the open middle tile
        let pos = Vec2::splat(1.5 * TILE_SIZE);
        // Any push large enough to land in the surrounding walls rolls back
        let after = step_with_rollback(pos, Vec2::new(TILE_SIZE, 0.0), &grid);
        assert_eq!(after, pos);
        let after = step_with_rollback(pos, Vec2::new(TILE_SIZE, TILE_SIZE), &grid);
        assert_eq!(after, pos);
    }

    #[test]
    fn test_open_move_applies_in_full() {
        let grid = crate::map::TileGrid::parse("....\n....").unwrap();
        let pos = Vec2::new(10.0, 10.0);
        let after = step_with_rollback(pos, Vec2::new(5.0, -3.0), &grid);
        assert_eq!(after, Vec2::new(15.0, 7.0));
    }

    proptest! {
        #[test]
        fn prop_diagonal_never_exceeds_speed(speed in 0.1f32..20.0) {
            let vel = velocity_from_input(&input(true, false, false, true), speed);
            prop_assert!((vel.length() - speed).abs() < 1e-3);
        }

        #[test]
        fn prop_rollback_returns_old_or_tentative(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            dx in -50.0f32..50.0,
            dy in -50.0f32..50.0,
        ) {
            let grid = crate::map::TileGrid::parse("#.#\n.#.\n#.#").unwrap();
            let pos = Vec2::new(x, y);
            let vel = Vec2::new(dx, dy);
            let after = step_with_rollback(pos, vel, &grid);
            prop_assert!(after == pos || after == pos + vel);
            prop_assert!(!grid.is_wall(after.x, after.y) || after == pos);
        }
    }
}
