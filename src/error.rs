//! Error types
//!
//! The core has almost nothing that can fail at steady state: bad events are
//! rejected and ignored, out-of-range spawns are clamped. The remaining
//! variants cover the settings file.

use thiserror::Error;

use crate::screen::{Screen, ScreenEvent};

#[derive(Debug, Error)]
pub enum GameError {
    /// The current screen does not accept this event
    #[error("event {event:?} is not valid on the {screen:?} screen")]
    InvalidTransition { screen: Screen, event: ScreenEvent },

    /// A spawn was requested outside the playable width
    #[error("spawn x {x} outside [0, {max}]")]
    EntityBounds { x: f32, max: f32 },

    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is malformed: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
