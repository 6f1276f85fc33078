//! Falling entities: drops and power-ups
//!
//! Both share the same lifecycle (spawn at the top, fall, get caught or fall
//! off the bottom). Power-up kinds differ only in what they do on catch and
//! how they should be drawn, which is a table lookup on the kind.

use serde::{Deserialize, Serialize};

use super::movement::Movement;
use super::player::Player;
use super::rect::Rect;
use crate::consts::*;

/// Every kind of thing that can fall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    GoodDrop,
    BadDrop,
    PointsPowerUp,
    LifePowerUp,
}

/// Drop flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropKind {
    /// +1 score when caught
    Good,
    /// Costs a life when caught
    Bad,
}

impl DropKind {
    pub fn entity_kind(self) -> EntityKind {
        match self {
            DropKind::Good => EntityKind::GoodDrop,
            DropKind::Bad => EntityKind::BadDrop,
        }
    }
}

/// A falling drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raindrop {
    pub id: u32,
    pub kind: DropKind,
    pub rect: Rect,
    pub movement: Movement,
}

impl Raindrop {
    pub fn new(id: u32, kind: DropKind, x: f32, movement: Movement) -> Self {
        Self {
            id,
            kind,
            rect: Rect::new(x, SCREEN_HEIGHT, DROP_SIZE, DROP_SIZE),
            movement,
        }
    }

    #[inline]
    pub fn velocity_y(&self) -> f32 {
        self.movement.velocity_y()
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Star: bonus score
    Points,
    /// Heart: one extra life (capped)
    Life,
}

/// What a power-up does to the catcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpEffect {
    AddScore(u32),
    GainLife,
}

/// How the renderer should animate a power-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VisualHint {
    /// Rotating yellow-tinted star; degrees per second
    Spinning { degrees_per_sec: f32 },
    /// Heart with alpha pulsing once per second
    Pulsing { period_secs: f32 },
}

impl PowerUpKind {
    pub fn entity_kind(self) -> EntityKind {
        match self {
            PowerUpKind::Points => EntityKind::PointsPowerUp,
            PowerUpKind::Life => EntityKind::LifePowerUp,
        }
    }

    pub fn effect(self) -> PowerUpEffect {
        match self {
            PowerUpKind::Points => PowerUpEffect::AddScore(POWER_UP_POINTS),
            PowerUpKind::Life => PowerUpEffect::GainLife,
        }
    }

    pub fn visual_hint(self) -> VisualHint {
        match self {
            PowerUpKind::Points => VisualHint::Spinning {
                degrees_per_sec: POWER_UP_SPIN_RATE,
            },
            PowerUpKind::Life => VisualHint::Pulsing { period_secs: 1.0 },
        }
    }

    /// Apply this kind's effect to the catcher
    pub fn activate(self, player: &mut Player) {
        match self.effect() {
            PowerUpEffect::AddScore(points) => player.add_score(points),
            PowerUpEffect::GainLife => player.gain_life(),
        }
    }
}

/// A falling power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub rect: Rect,
    pub movement: Movement,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, x: f32) -> Self {
        Self {
            id,
            kind,
            rect: Rect::new(x, SCREEN_HEIGHT, POWER_UP_SIZE, POWER_UP_SIZE),
            movement: Movement::normal(POWER_UP_SPEED),
        }
    }

    pub fn activate(&self, player: &mut Player) {
        self.kind.activate(player);
    }
}

/// Things that happened during a tick that the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    DropCaught,
    PlayerHurt,
    PowerUpCollected(PowerUpKind),
}
