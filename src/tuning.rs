//! Difficulty tuning
//!
//! All balance knobs for a run live in [`Tuning`]. A run reads them once at
//! construction and every barrier it spawns uses the same values.

use serde::{Deserialize, Serialize};

use crate::World;
use crate::consts::{BARRIER_MIN_OFFSET, FLYER_HEIGHT};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" | "normal" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Balance values for this preset
    pub fn tuning(&self) -> Tuning {
        match self {
            Difficulty::Easy => Tuning {
                speed: 2.0,
                gap: 220.0,
                gravity: 0.18,
                jump_impulse: -5.2,
                spawn_interval: 140,
            },
            Difficulty::Medium => Tuning {
                speed: 2.5,
                gap: 180.0,
                gravity: 0.2,
                jump_impulse: -5.5,
                spawn_interval: 120,
            },
            Difficulty::Hard => Tuning {
                speed: 3.2,
                gap: 150.0,
                gravity: 0.24,
                jump_impulse: -6.0,
                spawn_interval: 100,
            },
        }
    }
}

/// Injectable balance parameters
///
/// Units are per tick, not per second: the simulation advances one tick per
/// rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tuning {
    /// Barrier horizontal speed (pixels/tick, leftward)
    pub speed: f32,
    /// Vertical opening between top and bottom segments (pixels)
    pub gap: f32,
    /// Downward acceleration (pixels/tick²)
    pub gravity: f32,
    /// Velocity set on flap (negative = upward)
    pub jump_impulse: f32,
    /// Ticks between barrier spawns
    pub spawn_interval: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Difficulty::default().tuning()
    }
}

impl Tuning {
    /// Parse a JSON override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Return a copy with unusable values replaced
    ///
    /// The simulation itself never fails, so bad values are corrected here
    /// once instead of being checked every tick.
    pub fn sanitized(&self, world: &World) -> Self {
        let defaults = Self::default();
        let mut tuning = *self;

        if !tuning.speed.is_finite() || tuning.speed <= 0.0 {
            log::warn!("Invalid barrier speed {}, using {}", tuning.speed, defaults.speed);
            tuning.speed = defaults.speed;
        }

        if !tuning.gravity.is_finite() || tuning.gravity < 0.0 {
            log::warn!("Invalid gravity {}, using {}", tuning.gravity, defaults.gravity);
            tuning.gravity = defaults.gravity;
        }

        if !tuning.jump_impulse.is_finite() || tuning.jump_impulse >= 0.0 {
            log::warn!(
                "Jump impulse {} does not point upward, using {}",
                tuning.jump_impulse,
                defaults.jump_impulse
            );
            tuning.jump_impulse = defaults.jump_impulse;
        }

        if tuning.spawn_interval == 0 {
            log::warn!("Spawn interval must be at least one tick, using {}", defaults.spawn_interval);
            tuning.spawn_interval = defaults.spawn_interval;
        }

        // Gap must admit the flyer and still leave room for both segments
        let max_gap = (world.height - 2.0 * BARRIER_MIN_OFFSET).max(FLYER_HEIGHT);
        if !tuning.gap.is_finite() || tuning.gap < FLYER_HEIGHT || tuning.gap > max_gap {
            let gap = if tuning.gap.is_finite() {
                tuning.gap.clamp(FLYER_HEIGHT, max_gap)
            } else {
                defaults.gap.min(max_gap)
            };
            log::warn!("Gap {} does not fit world height {}, using {}", tuning.gap, world.height, gap);
            tuning.gap = gap;
        }

        tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_medium() {
        assert_eq!(Tuning::default(), Difficulty::Medium.tuning());
    }

    #[test]
    fn test_difficulty_round_trips_through_str() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(difficulty.as_str()), Some(difficulty));
        }
        assert_eq!(Difficulty::from_str("normal"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_harder_presets_are_faster_and_tighter() {
        let easy = Difficulty::Easy.tuning();
        let hard = Difficulty::Hard.tuning();
        assert!(hard.speed > easy.speed);
        assert!(hard.gap < easy.gap);
        assert!(hard.spawn_interval < easy.spawn_interval);
    }

    #[test]
    fn test_from_json_partial_override() {
        let tuning = Tuning::from_json(r#"{"speed": 4.0, "spawnInterval": 300}"#).unwrap();
        assert_eq!(tuning.speed, 4.0);
        assert_eq!(tuning.spawn_interval, 300);
        // Untouched fields keep defaults
        assert_eq!(tuning.gap, Tuning::default().gap);
        assert_eq!(tuning.jump_impulse, Tuning::default().jump_impulse);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Tuning::from_json("not json").is_err());
        assert!(Tuning::from_json(r#"{"speed": "fast"}"#).is_err());
    }

    #[test]
    fn test_sanitized_keeps_valid_values() {
        let world = World::default();
        let tuning = Difficulty::Hard.tuning();
        assert_eq!(tuning.sanitized(&world), tuning);
    }

    #[test]
    fn test_sanitized_fixes_bad_values() {
        let world = World::default();
        let tuning = Tuning {
            speed: -1.0,
            gap: 5000.0,
            gravity: f32::NAN,
            jump_impulse: 3.0,
            spawn_interval: 0,
        };
        let fixed = tuning.sanitized(&world);
        let defaults = Tuning::default();

        assert_eq!(fixed.speed, defaults.speed);
        assert_eq!(fixed.gravity, defaults.gravity);
        assert_eq!(fixed.jump_impulse, defaults.jump_impulse);
        assert_eq!(fixed.spawn_interval, defaults.spawn_interval);
        assert_eq!(fixed.gap, world.height - 2.0 * BARRIER_MIN_OFFSET);
    }
}
