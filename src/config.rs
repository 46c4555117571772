//! Data-driven gameplay tuning
//!
//! Everything a level designer might reasonably retune lives here;
//! structural constants (tile size, hitboxes, tick rate) stay in
//! `crate::consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning load failures, fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What an ammo pickup does
///
/// The two shipped variants of the game disagreed here, so it is a
/// configuration choice rather than a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupRule {
    /// Set ammo back to `ammo_count`
    RefillToMax,
    /// Add a fixed increment, capped at `ammo_count`
    Add(u32),
}

/// Gameplay tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player movement speed (world units per tick)
    pub player_speed: f32,
    /// Enemy pursuit speed (world units per tick)
    pub enemy_speed: f32,
    /// Whether enemies pursue the player or hold position
    pub pursuit: bool,

    /// Ticks between player shots
    pub shoot_cooldown: u32,
    /// Ticks between enemy shots
    pub enemy_shoot_cooldown: u32,
    /// Ticks of continuous sight before an enemy may fire
    pub enemy_reaction_time: u32,

    /// Starting (and maximum) ammo
    pub ammo_count: u32,
    /// What picking up a dropped weapon does
    pub pickup: PickupRule,

    /// Bullet speed (world units per tick)
    pub bullet_speed: f32,
    /// Bullet lifetime in ticks
    pub bullet_lifetime: u32,
    /// Half-width of the symmetric spread range, degrees
    pub bullet_spread: f32,

    /// Percent chance a dying enemy drops a weapon
    pub drop_chance: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 6.0,
            enemy_speed: 3.0,
            pursuit: false,
            shoot_cooldown: 12,
            enemy_shoot_cooldown: 40,
            enemy_reaction_time: 25,
            ammo_count: 24,
            pickup: PickupRule::RefillToMax,
            bullet_speed: 30.0,
            bullet_lifetime: 45,
            bullet_spread: 5.0,
            drop_chance: 30,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file; absent fields fall back to defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let tuning = serde_json::from_str(&text)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Ammo after collecting a pickup
    pub fn ammo_after_pickup(&self, current: u32) -> u32 {
        match self.pickup {
            PickupRule::RefillToMax => self.ammo_count,
            PickupRule::Add(n) => (current + n).min(self.ammo_count),
        }
    }
}
