//! The player-controlled flyer
//!
//! Falls under gravity, gets an instant upward velocity on flap, and rests
//! on the ceiling or floor instead of leaving the world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::World;
use crate::consts::{FLYER_HEIGHT, FLYER_WIDTH, FLYER_X};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flyer {
    /// Top-left corner; x never changes after spawn
    pub pos: Vec2,
    /// Vertical velocity (positive = downward)
    pub vel: f32,
    pub size: Vec2,
    pub gravity: f32,
    /// Velocity set on flap (negative = upward)
    pub jump_impulse: f32,
    world_height: f32,
}

impl Flyer {
    /// Spawn at the vertical centre of the world
    pub fn new(world: &World, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(FLYER_X, world.height / 2.0),
            vel: 0.0,
            size: Vec2::new(FLYER_WIDTH, FLYER_HEIGHT),
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
            world_height: world.height,
        }
    }

    /// Integrate one tick of gravity, then clamp to the world
    pub fn update(&mut self) {
        self.vel += self.gravity;
        self.pos.y += self.vel;

        let floor = self.world_height - self.size.y;
        if self.pos.y > floor {
            self.pos.y = floor;
            self.vel = 0.0;
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel = 0.0;
        }
    }

    /// Overwrite velocity with the jump impulse
    pub fn flap(&mut self) {
        self.vel = self.jump_impulse;
    }

    pub fn reset(&mut self) {
        self.pos.y = self.world_height / 2.0;
        self.vel = 0.0;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Vertical centre of the flyer
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}
