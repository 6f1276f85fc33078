//! Cross-match session data
//!
//! Lives for the whole process run and is never persisted: the selected
//! difficulty, the best score so far, and the summary of the last match.

use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;

/// Summary shown on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u32,
    pub difficulty: Difficulty,
    /// This match set a new best score
    pub new_best: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSession {
    /// Tier of the current (or next) match
    pub difficulty: Difficulty,
    /// Best score this run
    pub best_score: u32,
    pub last_result: Option<MatchResult>,
}

impl MatchSession {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            best_score: 0,
            last_result: None,
        }
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best_score
    }

    /// Record a finished match; returns whether it set a new best
    pub fn record_result(&mut self, score: u32) -> bool {
        let new_best = self.qualifies(score);
        if new_best {
            log::info!("New best score: {} (was {})", score, self.best_score);
            self.best_score = score;
        }
        self.last_result = Some(MatchResult {
            score,
            difficulty: self.difficulty,
            new_best,
        });
        new_best
    }
}
