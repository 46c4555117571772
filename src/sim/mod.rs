//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity id)
//! - No rendering or platform dependencies

pub mod ai;
pub mod ballistics;
pub mod draw;
pub mod movement;
pub mod player;
pub mod registry;
pub mod state;
pub mod tick;

pub use ai::line_of_sight;
pub use draw::{camera_offset, draw_list, hud, DrawCmd, Hud, SpriteRole};
pub use movement::{step_with_rollback, velocity_from_input};
pub use registry::{EntityRegistry, Group, PLAYER_ID};
pub use state::{
    affects, Bullet, BulletSource, DroppedWeapon, Enemy, GameEvent, Player, Rect, SessionOutcome,
    SessionState, TargetKind,
};
pub use tick::{tick, TickInput};
