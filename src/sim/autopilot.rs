//! Demo-mode autopilot
//!
//! Keeps the flyer near the centre of the next gap while a run is active.
//! Drives demo-mode runs in the browser and the headless native run; not
//! meant to be perfect.

use super::state::{GamePhase, GameState};

/// How far below the gap centre the flyer may sink before flapping
pub const AUTOPILOT_SLACK: f32 = 20.0;

/// Decide whether to flap this tick
pub fn should_flap(state: &GameState) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }

    // Still rising from the last flap
    if state.flyer.vel < 0.0 {
        return false;
    }

    state.flyer.center_y() > target_y(state) + AUTOPILOT_SLACK
}

/// Gap centre of the first barrier the flyer hasn't cleared yet
pub fn target_y(state: &GameState) -> f32 {
    let flyer_x = state.flyer.pos.x;
    state
        .stream
        .barriers()
        .iter()
        .find(|b| b.x + b.width >= flyer_x)
        .map(|b| b.gap_center())
        .unwrap_or(state.world.height / 2.0)
}
