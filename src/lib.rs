//! Quickdraw - a top-down one-hit-kill arena shooter core
//!
//! Core modules:
//! - `map`: Tile grid parsing and wall queries
//! - `sim`: Deterministic simulation (movement, AI, ballistics, session loop)
//! - `config`: Data-driven gameplay tuning
//! - `times`: Best-time leaderboard persistence

pub mod config;
pub mod map;
pub mod sim;
pub mod times;

pub use config::{PickupRule, Tuning};
pub use map::TileGrid;
pub use times::TimeStore;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation tick rate (Hz)
    pub const TICK_RATE: u32 = 60;
    /// Wall-clock milliseconds represented by one tick
    pub const MS_PER_TICK: f64 = 1000.0 / TICK_RATE as f64;

    /// Tile edge length in world units
    pub const TILE_SIZE: f32 = 64.0;

    /// Logical screen dimensions (aim input is cursor-relative to center)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Player hitbox edge lengths, fixed and independent of the sprite bounds
    pub const PLAYER_HITBOX: Vec2 = Vec2::new(80.0, 80.0);
    /// Enemy hitbox, the logical size of the default-orientation sprite
    pub const ENEMY_HITBOX: Vec2 = Vec2::new(90.0, 90.0);
    /// Bullet hitbox, the logical size of the bullet sprite
    pub const BULLET_HITBOX: Vec2 = Vec2::new(24.0, 8.0);
    /// Dropped weapon hitbox for pickup overlap
    pub const DROP_HITBOX: Vec2 = Vec2::new(48.0, 48.0);

    /// Muzzle point in player-local space, rotated by the aim angle at fire time
    pub const GUN_OFFSET: Vec2 = Vec2::new(44.0, 18.0);
    /// Muzzle point in enemy-local space
    pub const ENEMY_GUN_OFFSET: Vec2 = Vec2::new(40.0, 14.0);
}

/// Unit vector for an angle in degrees (screen space, Y-down)
#[inline]
pub fn vec_from_degrees(deg: f32) -> Vec2 {
    let rad = deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Rotate a vector by an angle in degrees (screen space, Y-down)
#[inline]
pub fn rotate_degrees(v: Vec2, deg: f32) -> Vec2 {
    let rad = deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Angle of a vector in degrees (atan2, screen space)
#[inline]
pub fn angle_degrees(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_from_degrees_axes() {
        assert!((vec_from_degrees(0.0) - Vec2::X).length() < 1e-6);
        // 90 degrees points down in screen space
        assert!((vec_from_degrees(90.0) - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_rotate_degrees_matches_angle() {
        let v = rotate_degrees(Vec2::new(10.0, 0.0), 37.0);
        assert!((angle_degrees(v) - 37.0).abs() < 1e-4);
        assert!((v.length() - 10.0).abs() < 1e-4);
    }
}
