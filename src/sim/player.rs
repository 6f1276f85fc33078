//! The catcher
//!
//! Slides along the bottom of the screen, keeps score and lives, and goes
//! briefly invulnerable after every hit.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::clamp_to_screen;
use crate::consts::*;

/// Held movement keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
}

/// The player's catcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub score: u32,
    pub lives: u8,
    /// Recently hit; further damage is ignored
    pub invulnerable: bool,
    /// Seconds spent in the current invulnerability window
    pub invulnerability_elapsed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Player {
    /// Fresh catcher centered at the bottom of the screen
    pub fn new(starting_lives: u8) -> Self {
        Self {
            rect: Rect::new(
                SCREEN_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                PLAYER_Y,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            score: 0,
            lives: starting_lives.min(MAX_LIVES),
            invulnerable: false,
            invulnerability_elapsed: 0.0,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.rect.pos.x
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// Per-tick update: movement first, then the invulnerability clock
    pub fn update(&mut self, dt: f32, input: MoveInput) {
        self.move_horizontal(dt, input.left, input.right);
        self.tick_invulnerability(dt);
    }

    /// Left and right are applied independently, so holding both cancels out
    pub fn move_horizontal(&mut self, dt: f32, left: bool, right: bool) {
        let step = PLAYER_SPEED * dt;
        if left {
            self.rect.pos.x -= step;
        }
        if right {
            self.rect.pos.x += step;
        }
        self.rect.pos.x = clamp_to_screen(self.rect.pos.x, self.rect.width());
    }

    /// Lose a life unless invulnerable. Returns whether damage was applied.
    pub fn take_damage(&mut self) -> bool {
        if self.invulnerable {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.invulnerable = true;
        self.invulnerability_elapsed = 0.0;
        true
    }

    pub fn tick_invulnerability(&mut self, dt: f32) {
        if !self.invulnerable {
            return;
        }
        self.invulnerability_elapsed += dt;
        if self.invulnerability_elapsed > INVULNERABILITY_SECS {
            self.invulnerable = false;
            self.invulnerability_elapsed = 0.0;
        }
    }

    /// Blink: while invulnerable, hidden on alternating 0.1 s windows
    pub fn is_visible_this_frame(&self) -> bool {
        if !self.invulnerable {
            return true;
        }
        let frame = (self.invulnerability_elapsed * BLINK_RATE).floor() as u32;
        frame % 4 < 2
    }

    pub fn gain_life(&mut self) {
        self.lives = (self.lives + 1).min(MAX_LIVES);
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }
}
