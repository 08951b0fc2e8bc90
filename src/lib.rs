//! Flap Dash - A side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (physics, barriers, collisions, game state)
//! - `tuning`: Data-driven difficulty balance
//! - `settings`: Player preferences (LocalStorage on web)
//! - `highscores`: In-memory leaderboard

pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{Difficulty, Tuning};

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Default world dimensions (logical pixels)
    pub const WORLD_WIDTH: f32 = 480.0;
    pub const WORLD_HEIGHT: f32 = 700.0;

    /// Flyer defaults - x is fixed for the whole run
    pub const FLYER_X: f32 = 100.0;
    pub const FLYER_WIDTH: f32 = 40.0;
    pub const FLYER_HEIGHT: f32 = 30.0;

    /// Barrier defaults
    pub const BARRIER_WIDTH: f32 = 72.0;
    /// Minimum distance between the gap and the world edges when rolling a gap
    pub const BARRIER_MIN_OFFSET: f32 = 50.0;

    /// Pending events kept before the oldest is dropped
    pub const MAX_PENDING_EVENTS: usize = 64;
}

/// Playfield dimensions, fixed for the lifetime of a game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl World {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(consts::WORLD_WIDTH, consts::WORLD_HEIGHT)
    }
}
