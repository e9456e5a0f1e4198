//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::autopilot;
use super::collision;
use super::session::{self, GameMode};
use super::state::GameState;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Held fire; shots leave whenever the cooldown allows
    pub fire: bool,
    pub dash: bool,
    /// Spend a full gauge on overcharge
    pub overcharge: bool,
    /// Demo mode: the autopilot replaces the other flags
    pub autopilot: bool,
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.saves.clear();

    if state.session.mode == GameMode::GameOver {
        return;
    }

    let input = if input.autopilot {
        autopilot::steer(state)
    } else {
        *input
    };

    state.time_ticks += 1;

    state.update_player(&input);
    // World time slows while the player is overcharged
    let scale = state.player.time_scale();
    state.advance_world(scale);

    state.purge_dead();
    collision::resolve(state);
    state.purge_dead();

    // Children and drops join collisions from the next tick
    state.drain_spawn_queue();

    session::step(state);
    session::flush_high_score(state);
}
