//! Presentation output boundary
//!
//! The core never touches pixels; each tick it can emit a camera offset,
//! an ordered draw list of (sprite role, world position, rotation) and the
//! HUD values. Rotation is the negated entity angle so the presentation
//! layer can rotate the default-orientation asset directly (screen space
//! is Y-down). Rotating fresh from the default asset every frame avoids
//! the quality loss of compounding rotations.

use glam::Vec2;

use super::state::SessionState;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Sprite asset roles the presentation layer must supply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteRole {
    Player,
    Enemy,
    EnemyDead,
    Bullet,
    DroppedWeapon,
}

/// One sprite to draw at a world position with an absolute rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCmd {
    pub role: SpriteRole,
    pub pos: Vec2,
    /// Degrees, counter-clockwise, applied to the default orientation
    pub rotation: f32,
}

/// Numeric HUD values for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub ammo: u32,
    pub elapsed_ms: f64,
}

/// Camera offset that keeps the player at screen center
pub fn camera_offset(state: &SessionState) -> Vec2 {
    state.registry.player.pos - Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0)
}

/// Build this tick's draw list in painter's order: drops under bullets
/// under enemies, player always on top
pub fn draw_list(state: &SessionState) -> Vec<DrawCmd> {
    let registry = &state.registry;
    let mut cmds = Vec::with_capacity(registry.count(super::registry::Group::All));

    for drop in &registry.drops {
        cmds.push(DrawCmd {
            role: SpriteRole::DroppedWeapon,
            pos: drop.pos,
            rotation: 0.0,
        });
    }
    for bullet in &registry.bullets {
        cmds.push(DrawCmd {
            role: SpriteRole::Bullet,
            pos: bullet.pos,
            rotation: -crate::angle_degrees(bullet.vel),
        });
    }
    for enemy in &registry.enemies {
        // Dead enemies keep drawing, frozen at their death-moment facing
        let (role, angle) = if enemy.is_dead {
            (SpriteRole::EnemyDead, enemy.death_angle)
        } else {
            (SpriteRole::Enemy, enemy.aim_angle)
        };
        cmds.push(DrawCmd {
            role,
            pos: enemy.pos,
            rotation: -angle,
        });
    }
    cmds.push(DrawCmd {
        role: SpriteRole::Player,
        pos: registry.player.pos,
        rotation: -registry.player.aim_angle,
    });

    cmds
}

/// HUD values for this tick
pub fn hud(state: &SessionState) -> Hud {
    Hud {
        ammo: state.registry.player.ammo,
        elapsed_ms: state.elapsed_ms(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::map::TileGrid;
    use crate::sim::state::SessionState;

    fn session() -> SessionState {
        let grid = TileGrid::parse("#####\n#P..#\n#.E.#\n#####").unwrap();
        SessionState::new(grid, Tuning::default(), 11)
    }

    #[test]
    fn test_player_drawn_last() {
        let state = session();
        let cmds = draw_list(&state);
        assert_eq!(cmds.last().unwrap().role, SpriteRole::Player);
        assert_eq!(cmds.len(), 2);
    }

    #[test]
    fn test_dead_enemy_uses_dead_sprite_and_death_angle() {
        let mut state = session();
        state.registry.enemies[0].aim_angle = 30.0;
        state.registry.enemies[0].kill();
        let cmds = draw_list(&state);
        let enemy_cmd = cmds
            .iter()
            .find(|c| c.role == SpriteRole::EnemyDead)
            .unwrap();
        assert_eq!(enemy_cmd.rotation, -30.0);
    }

    #[test]
    fn test_camera_centers_player() {
        let state = session();
        let offset = camera_offset(&state);
        assert_eq!(
            state.registry.player.pos - offset,
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0)
        );
    }

    #[test]
    fn test_hud_values() {
        let mut state = session();
        state.time_ticks = 60;
        let hud = hud(&state);
        assert_eq!(hud.ammo, state.tuning.ammo_count);
        assert!((hud.elapsed_ms - 1000.0).abs() < 1e-6);
    }
}
