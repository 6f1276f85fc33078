//! Difficulty tiers and their gameplay constants
//!
//! A tier is picked once per match and its profile is never mutated, so the
//! canonical profiles are plain statics shared by the field and the HUD.

use serde::{Deserialize, Serialize};

/// Selectable difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Tunable constants for one tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyProfile {
    pub name: &'static str,
    /// Fall speed of good drops (px/s)
    pub good_drop_speed: f32,
    /// Fall speed of bad drops (px/s)
    pub bad_drop_speed: f32,
    /// Seconds between drop spawn checks
    pub drop_spawn_interval: f32,
    /// Chance that a spawned drop is good, in [0, 1]
    pub good_drop_probability: f32,
    pub starting_lives: u8,
    /// Seconds between power-up spawns
    pub power_up_spawn_interval: f32,
    pub description: &'static str,
}

pub static EASY: DifficultyProfile = DifficultyProfile {
    name: "Easy",
    good_drop_speed: 150.0,
    bad_drop_speed: 130.0,
    drop_spawn_interval: 1.5,
    good_drop_probability: 0.8,
    starting_lives: 5,
    power_up_spawn_interval: 4.0,
    description: "Slow drops and extra lives, ideal for beginners",
};

pub static MEDIUM: DifficultyProfile = DifficultyProfile {
    name: "Medium",
    good_drop_speed: 200.0,
    bad_drop_speed: 180.0,
    drop_spawn_interval: 1.0,
    good_drop_probability: 0.7,
    starting_lives: 3,
    power_up_spawn_interval: 6.0,
    description: "Moderate speed, balanced, ideal for intermediate players",
};

pub static HARD: DifficultyProfile = DifficultyProfile {
    name: "Hard",
    good_drop_speed: 280.0,
    bad_drop_speed: 260.0,
    drop_spawn_interval: 0.6,
    good_drop_probability: 0.5,
    starting_lives: 2,
    power_up_spawn_interval: 8.0,
    description: "Fast drops, few lives, experts only",
};

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The canonical profile for this tier
    pub fn profile(self) -> &'static DifficultyProfile {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Medium => &MEDIUM,
            Difficulty::Hard => &HARD,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.profile().name
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "1" => Some(Difficulty::Easy),
            "medium" | "med" | "2" => Some(Difficulty::Medium),
            "hard" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}
