//! Fixed timestep session loop
//!
//! One call to [`tick`] is one simulation step: player phase, enemy phase,
//! bullet phase, then the win/lose check. Frame pacing belongs to the
//! caller; the simulation itself is clocked purely in ticks.

use glam::Vec2;

use super::ai::update_enemies;
use super::ballistics::update_bullets;
use super::player::update_player;
use super::registry::Group;
use super::state::{SessionOutcome, SessionState};

/// Polled input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Four-directional movement key state
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Primary fire button held
    pub fire: bool,
    /// Pointer position in screen coordinates
    pub cursor: Vec2,
    /// Restart key; resets the whole session
    pub restart: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut SessionState, input: &TickInput) {
    if input.restart {
        state.reset();
        return;
    }

    // A decided session freezes until an explicit restart
    if state.outcome != SessionOutcome::Running {
        return;
    }

    state.time_ticks += 1;

    update_player(state, input);
    update_enemies(state);
    update_bullets(state);
    // Drops are static; they only react to pickup overlap in the player phase

    state.outcome = evaluate_outcome(state);
    if state.outcome == SessionOutcome::StageCleared {
        log::info!(
            "Stage cleared in {:.2}s",
            state.elapsed_ms() / 1000.0
        );
    }
}

/// Win/lose check for the end of a tick
///
/// Stage-cleared fires iff the enemy group is empty and the player hitbox
/// overlaps the exit tile's corner point.
fn evaluate_outcome(state: &SessionState) -> SessionOutcome {
    if !state.registry.player.alive {
        return SessionOutcome::PlayerDead;
    }
    if let Some(exit) = state.grid.exit_world_pos() {
        if state.registry.count(Group::Enemies) == 0
            && state.registry.player.hitbox().contains_point(exit)
        {
            return SessionOutcome::StageCleared;
        }
    }
    SessionOutcome::Running
}
