//! Game state and run lifecycle
//!
//! [`GameState`] is the single owner of everything the simulation touches.
//! The presentation layer reads it and polls [`GameEvent`]s; it never
//! mutates components directly.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::flyer::Flyer;
use super::stream::BarrierStream;
use crate::World;
use crate::consts::MAX_PENDING_EVENTS;
use crate::highscores::HighScores;
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu shown, nothing simulated
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; state kept for display
    GameOver,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    RunStarted,
    BarrierSpawned,
    BarrierPassed { score: u32 },
    GameOver { score: u32, best: u32 },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub best: u32,
    pub time_ticks: u64,
    pub flyer: Rect,
    pub barriers: Vec<Rect>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub world: World,
    /// Sanitized tuning used for the whole game
    pub tuning: Tuning,
    /// Seed for the barrier RNG
    pub seed: u64,
    pub phase: GamePhase,
    /// Barriers cleared this run
    pub score: u32,
    pub flyer: Flyer,
    pub stream: BarrierStream,
    /// Finished runs, best first
    pub high_scores: HighScores,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game sitting at the menu
    pub fn new(world: World, tuning: Tuning, seed: u64) -> Self {
        let tuning = tuning.sanitized(&world);
        Self {
            world,
            tuning,
            seed,
            phase: GamePhase::Idle,
            score: 0,
            flyer: Flyer::new(&world, &tuning),
            stream: BarrierStream::new(world, &tuning, Pcg32::seed_from_u64(seed)),
            high_scores: HighScores::new(),
            events: Vec::new(),
        }
    }

    /// Begin a fresh run
    ///
    /// The first barrier is spawned here: the stream's counter starts at 0,
    /// so its own cadence would not produce one until a full interval passed.
    pub fn start_run(&mut self) {
        self.flyer.reset();
        self.stream.clear();
        self.stream.spawn();
        self.score = 0;
        self.set_phase(GamePhase::Running);
        self.push_event(GameEvent::RunStarted);
        log::info!("Run started (seed {})", self.seed);
    }

    /// Freeze the run and record the final score
    pub fn end_run(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.set_phase(GamePhase::GameOver);
        self.high_scores.add_score(self.score, self.time_ticks());
        let best = self.best_score();
        self.push_event(GameEvent::GameOver {
            score: self.score,
            best,
        });
        log::info!(
            "Run over: score {} after {} ticks (best {})",
            self.score,
            self.time_ticks(),
            best
        );
    }

    /// Flap the flyer; ignored unless a run is active
    pub fn flap(&mut self) {
        if self.phase == GamePhase::Running {
            self.flyer.flap();
        }
    }

    /// Leave the game-over screen for the menu
    pub fn return_to_menu(&mut self) {
        if self.phase == GamePhase::GameOver {
            self.set_phase(GamePhase::Idle);
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Ticks simulated in the current run
    pub fn time_ticks(&self) -> u64 {
        self.stream.tick_counter()
    }

    pub fn best_score(&self) -> u32 {
        self.high_scores.top_score().unwrap_or(0)
    }

    pub fn flyer_bounds(&self) -> Rect {
        self.flyer.bounds()
    }

    /// Every barrier segment box, top then bottom, in spawn order
    pub fn barrier_segments(&self) -> Vec<Rect> {
        self.stream.barriers().iter().flat_map(|b| b.bounds()).collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            best: self.best_score(),
            time_ticks: self.time_ticks(),
            flyer: self.flyer_bounds(),
            barriers: self.barrier_segments(),
        }
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        // Nobody polling; drop the oldest
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        self.push_event(GameEvent::PhaseChanged { from, to });
        log::info!("Phase {:?} -> {:?}", from, to);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(World::default(), Tuning::default(), 0)
    }
}
