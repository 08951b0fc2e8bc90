//! Per-frame simulation tick
//!
//! One call to [`tick`] per rendered frame. Input arrives as [`Command`]s
//! applied immediately, in arrival order, between ticks.

use super::collision::{intersects, touches_world_bounds};
use super::state::{GameEvent, GamePhase, GameState};

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Give the flyer its jump velocity (Running only)
    Flap,
    /// Leave the menu and begin a run (Idle only)
    Start,
    /// Begin a new run from the game-over screen (GameOver only)
    Restart,
    /// Go back to the menu from the game-over screen (GameOver only)
    Menu,
}

impl Command {
    /// The command a generic "action" input (click, tap, space) maps to
    pub fn primary_for(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Idle => Command::Start,
            GamePhase::Running => Command::Flap,
            GamePhase::GameOver => Command::Restart,
        }
    }
}

/// Apply a command; commands that don't fit the current phase are ignored
pub fn apply_command(state: &mut GameState, command: Command) {
    match (command, state.phase) {
        (Command::Flap, GamePhase::Running) => state.flap(),
        (Command::Start, GamePhase::Idle) | (Command::Restart, GamePhase::GameOver) => {
            state.start_run()
        }
        (Command::Menu, GamePhase::GameOver) => state.return_to_menu(),
        (command, phase) => {
            log::debug!("Ignoring {:?} while {:?}", command, phase);
        }
    }
}

/// Advance the game state by one tick
///
/// Order: flyer, barriers, scoring, collision. A no-op unless Running.
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.flyer.update();

    if state.stream.update() {
        state.push_event(GameEvent::BarrierSpawned);
    }

    let passed = state.stream.count_passed(state.flyer.pos.x);
    for _ in 0..passed {
        state.score += 1;
        state.push_event(GameEvent::BarrierPassed { score: state.score });
    }

    if detect_collision(state) {
        state.end_run();
    }
}

/// Flyer against the world edges and every barrier segment
///
/// The world-edge test overlaps with the flyer's own clamp: a clamped flyer
/// always sits exactly on an edge, and the inclusive test treats that as a
/// hit. Both paths agree.
fn detect_collision(state: &GameState) -> bool {
    let flyer = state.flyer.bounds();

    if touches_world_bounds(&flyer, state.world.height) {
        return true;
    }

    state
        .stream
        .barriers()
        .iter()
        .flat_map(|b| b.bounds())
        .any(|segment| intersects(&flyer, &segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::World;
    use crate::sim::Barrier;
    use crate::tuning::Tuning;

    fn running_state() -> GameState {
        let mut state = GameState::new(World::new(480.0, 700.0), Tuning::default(), 12345);
        apply_command(&mut state, Command::Start);
        state.drain_events();
        state
    }

    /// Replace the stream's barriers with a single scripted one
    fn place_barrier(state: &mut GameState, x: f32, top_height: f32) {
        let world = state.world;
        let barrier = Barrier::with_top_height(&world, x, state.tuning.speed, state.tuning.gap, top_height);
        let barriers = state.stream.barriers_mut();
        barriers.clear();
        barriers.push(barrier);
    }

    #[test]
    fn test_tick_is_noop_when_idle() {
        let mut state = GameState::new(World::default(), Tuning::default(), 1);
        let y = state.flyer.pos.y;
        tick(&mut state);
        assert_eq!(state.flyer.pos.y, y);
        assert_eq!(state.time_ticks(), 0);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_command_routing() {
        let mut state = GameState::new(World::default(), Tuning::default(), 1);

        // Flap and restart mean nothing at the menu
        apply_command(&mut state, Command::Flap);
        apply_command(&mut state, Command::Restart);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.flyer.vel, 0.0);

        apply_command(&mut state, Command::Start);
        assert_eq!(state.phase, GamePhase::Running);

        // Start while running doesn't restart
        tick(&mut state);
        apply_command(&mut state, Command::Start);
        assert_eq!(state.time_ticks(), 1);

        apply_command(&mut state, Command::Flap);
        assert_eq!(state.flyer.vel, state.tuning.jump_impulse);
    }

    #[test]
    fn test_primary_command_per_phase() {
        assert_eq!(Command::primary_for(GamePhase::Idle), Command::Start);
        assert_eq!(Command::primary_for(GamePhase::Running), Command::Flap);
        assert_eq!(Command::primary_for(GamePhase::GameOver), Command::Restart);
    }

    #[test]
    fn test_falling_to_floor_ends_run() {
        let mut state = running_state();

        for _ in 0..200 {
            tick(&mut state);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.flyer.pos.y, 700.0 - state.flyer.size.y);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut state = running_state();
        state.end_run();
        let y = state.flyer.pos.y;
        let ticks = state.time_ticks();
        let x = state.stream.barriers()[0].x;

        for _ in 0..10 {
            tick(&mut state);
        }

        assert_eq!(state.flyer.pos.y, y);
        assert_eq!(state.time_ticks(), ticks);
        assert_eq!(state.stream.barriers()[0].x, x);
    }

    #[test]
    fn test_passing_barrier_scores_once() {
        let mut state = running_state();
        // After one tick of speed 2.5 the trailing edge is at 99.5, left of the flyer
        place_barrier(&mut state, 30.0, 200.0);

        tick(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 1);
        assert!(state.drain_events().contains(&GameEvent::BarrierPassed { score: 1 }));

        tick(&mut state);
        tick(&mut state);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_hitting_barrier_segment_ends_run() {
        let mut state = running_state();
        // Flyer spans y 350..380; top segment reaches down to 500
        place_barrier(&mut state, 110.0, 500.0);

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PhaseChanged {
            from: GamePhase::Running,
            to: GamePhase::GameOver
        }));
    }

    #[test]
    fn test_flying_through_gap_is_safe() {
        let mut state = running_state();
        // Gap 300..480 around the flyer at 350..380
        place_barrier(&mut state, 110.0, 300.0);

        tick(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_ceiling_contact_ends_run() {
        let mut state = running_state();
        state.flyer.pos.y = 1.0;
        state.flyer.vel = -5.0;

        tick(&mut state);

        // Clamped to the ceiling, and the inclusive edge test agrees
        assert_eq!(state.flyer.pos.y, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = running_state();
        state.score = 3;
        state.end_run();

        apply_command(&mut state, Command::Restart);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks(), 0);
        assert_eq!(state.stream.len(), 1);
        assert_eq!(state.best_score(), 3);
    }

    #[test]
    fn test_menu_after_game_over() {
        let mut state = running_state();
        state.end_run();
        apply_command(&mut state, Command::Menu);
        assert_eq!(state.phase, GamePhase::Idle);

        // Menu from Idle is ignored
        apply_command(&mut state, Command::Menu);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_spawn_emits_event_on_interval() {
        let tuning = Tuning {
            spawn_interval: 5,
            ..Tuning::default()
        };
        let mut state = GameState::new(World::default(), tuning, 3);
        apply_command(&mut state, Command::Start);
        state.drain_events();

        for _ in 0..5 {
            state.flap();
            tick(&mut state);
        }

        assert_eq!(state.stream.len(), 2);
        assert!(state.drain_events().contains(&GameEvent::BarrierSpawned));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = running_state();
        let mut state2 = running_state();

        for i in 0..50 {
            if i % 12 == 0 {
                apply_command(&mut state1, Command::Flap);
                apply_command(&mut state2, Command::Flap);
            }
            tick(&mut state1);
            tick(&mut state2);
        }

        assert_eq!(state1.time_ticks(), state2.time_ticks());
        assert_eq!(state1.flyer.pos.y, state2.flyer.pos.y);
        assert_eq!(state1.barrier_segments(), state2.barrier_segments());
    }
}
