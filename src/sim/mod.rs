//! Tick-driven simulation module
//!
//! All gameplay logic lives here:
//! - One tick per frame, per-tick units
//! - Seeded RNG only
//! - Barriers iterate in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod barrier;
pub mod collision;
pub mod flyer;
pub mod state;
pub mod stream;
pub mod tick;

pub use barrier::Barrier;
pub use collision::{Rect, intersects, touches_world_bounds};
pub use flyer::Flyer;
pub use state::{GameEvent, GamePhase, GameState, Snapshot};
pub use stream::BarrierStream;
pub use tick::{Command, apply_command, tick};
