//! Barriers: a top and bottom segment with a gap between them
//!
//! The gap height is fixed per run; only its vertical position is rolled
//! when a barrier is created.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::World;
use crate::consts::{BARRIER_MIN_OFFSET, BARRIER_WIDTH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barrier {
    /// Left edge (decreases every tick)
    pub x: f32,
    pub width: f32,
    /// Height of the top segment, measured from y = 0
    pub top_height: f32,
    /// Top edge of the bottom segment (top_height + gap)
    pub bottom_y: f32,
    /// Height of the bottom segment, down to the world floor
    pub bottom_height: f32,
    /// Leftward speed (pixels/tick)
    pub speed: f32,
    /// Set once the flyer has cleared this barrier
    passed: bool,
}

impl Barrier {
    /// Create a barrier with a randomly placed gap
    pub fn new<R: Rng + ?Sized>(world: &World, spawn_x: f32, speed: f32, gap: f32, rng: &mut R) -> Self {
        let top_height = roll_top_height(world.height, gap, rng);
        Self::with_top_height(world, spawn_x, speed, gap, top_height)
    }

    /// Create a barrier with a known gap position
    pub fn with_top_height(world: &World, spawn_x: f32, speed: f32, gap: f32, top_height: f32) -> Self {
        let top_height = top_height.clamp(0.0, (world.height - gap).max(0.0));
        let bottom_y = top_height + gap;
        Self {
            x: spawn_x,
            width: BARRIER_WIDTH,
            top_height,
            bottom_y,
            bottom_height: (world.height - bottom_y).max(0.0),
            speed,
            passed: false,
        }
    }

    /// Move left by one tick of speed
    pub fn update(&mut self) {
        self.x -= self.speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }

    /// One-shot pass check
    ///
    /// Returns true on the first call where `entity_x` is past the trailing
    /// edge, false on every call after that.
    pub fn is_passed(&mut self, entity_x: f32) -> bool {
        if !self.passed && entity_x > self.x + self.width {
            self.passed = true;
            return true;
        }
        false
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Top and bottom segment boxes
    pub fn bounds(&self) -> [Rect; 2] {
        [
            Rect::new(self.x, 0.0, self.width, self.top_height),
            Rect::new(self.x, self.bottom_y, self.width, self.bottom_height),
        ]
    }

    /// Vertical centre of the gap
    #[inline]
    pub fn gap_center(&self) -> f32 {
        (self.top_height + self.bottom_y) / 2.0
    }
}

/// Roll a top-segment height that keeps the whole gap inside the world
///
/// `floor(random * range) + BARRIER_MIN_OFFSET`, where the range leaves at
/// least `BARRIER_MIN_OFFSET` above and below the gap.
pub fn roll_top_height<R: Rng + ?Sized>(world_height: f32, gap: f32, rng: &mut R) -> f32 {
    let range = world_height - gap - 2.0 * BARRIER_MIN_OFFSET;
    let top = if range > 0.0 {
        (rng.random::<f32>() * range).floor() + BARRIER_MIN_OFFSET
    } else {
        BARRIER_MIN_OFFSET
    };
    top.clamp(0.0, (world_height - gap).max(0.0))
}
