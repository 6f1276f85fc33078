//! Rain Catcher - catch the good drops, dodge the bad ones
//!
//! Core modules:
//! - `sim`: Deterministic simulation (drops, power-ups, player, collisions)
//! - `screen`: Screen state machine (menu, difficulty select, play, pause, game over)
//! - `platform`: Clock and input abstractions supplied by the host
//! - `audio`: Volume state and the sink the host plugs a sound device into
//! - `snapshot`: Read-only view handed to whatever draws the game

pub mod audio;
pub mod error;
pub mod platform;
pub mod screen;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use audio::{AudioManager, AudioSink, SoundEffect};
pub use error::{GameError, Result};
pub use screen::{Screen, ScreenEvent, ScreenMachine, TickOutcome};
pub use settings::Settings;
pub use sim::{Difficulty, DifficultyProfile, Player, RainField};
pub use snapshot::Snapshot;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless runner
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted before clamping
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World dimensions (pixels, y grows upward)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Drops are square
    pub const DROP_SIZE: f32 = 64.0;

    /// Power-up collision box is square
    pub const POWER_UP_SIZE: f32 = 48.0;
    /// Power-ups ignore difficulty and always fall at this speed
    pub const POWER_UP_SPEED: f32 = 120.0;
    /// Score granted by a points power-up
    pub const POWER_UP_POINTS: u32 = 5;
    /// Spin rate of the points power-up hint (degrees/s)
    pub const POWER_UP_SPIN_RATE: f32 = 120.0;

    /// Catcher defaults
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    pub const PLAYER_Y: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 400.0;

    /// Lives cap (power-ups never push past this)
    pub const MAX_LIVES: u8 = 5;
    /// Post-damage grace period (seconds)
    pub const INVULNERABILITY_SECS: f32 = 1.5;
    /// Blink rate while invulnerable (frames of 1/20 s, visible for 2 of every 4)
    pub const BLINK_RATE: f32 = 20.0;
}

/// Clamp an x coordinate so a box of `width` stays on screen
#[inline]
pub fn clamp_to_screen(x: f32, width: f32) -> f32 {
    x.clamp(0.0, (consts::SCREEN_WIDTH - width).max(0.0))
}
