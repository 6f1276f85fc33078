//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` handed to `update`
//! - Randomness only through a `RandomSource`
//! - Stable iteration order (spawn order)
//! - No rendering, audio device, or platform dependencies

pub mod autopilot;
pub mod difficulty;
pub mod entity;
pub mod field;
pub mod movement;
pub mod player;
pub mod rect;
pub mod rng;
pub mod tutorial;

pub use autopilot::autopilot_input;
pub use difficulty::{Difficulty, DifficultyProfile};
pub use entity::{DropKind, EntityKind, GameEvent, PowerUp, PowerUpEffect, PowerUpKind, Raindrop, VisualHint};
pub use field::{RainField, validate_spawn_x};
pub use movement::{Movement, MovementKind};
pub use player::{MoveInput, Player};
pub use rect::Rect;
pub use rng::{RandomSource, RngState, SeededRng};
pub use tutorial::{Tutorial, TutorialPhase};
