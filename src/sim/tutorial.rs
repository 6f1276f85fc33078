//! Interactive tutorial
//!
//! Three hands-on steps and a summary: move to the marked zone, catch a good
//! drop, let a bad drop fall past. Uses its own slower catcher and smaller
//! drops so it never touches the match state.

use serde::{Deserialize, Serialize};

use super::entity::DropKind;
use super::rect::Rect;
use super::rng::RandomSource;
use crate::clamp_to_screen;
use crate::consts::*;

/// Tutorial catcher speed (px/s)
const TUTORIAL_SPEED: f32 = 300.0;
/// Tutorial drops are smaller than real ones
const TUTORIAL_DROP_SIZE: f32 = 32.0;
const GOOD_FALL_SPEED: f32 = 180.0;
const BAD_FALL_SPEED: f32 = 200.0;
/// Horizontal jitter around the catcher for the good drop
const GOOD_DROP_JITTER: f32 = 30.0;
/// Delay before a step's drop appears
const DROP_DELAY: f32 = 0.2;
/// Minimum time in the move step before it can complete
const MOVE_MIN_TIME: f32 = 0.6;
/// Being this close to the zone's left edge also counts
const ZONE_SNAP: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TutorialPhase {
    /// Reach the target zone
    Move,
    /// Catch one good drop
    CatchGood,
    /// Let one bad drop fall past
    AvoidBad,
    /// Wait for confirm to start playing
    Summary,
}

/// Inputs the tutorial reacts to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TutorialInput {
    pub left: bool,
    pub right: bool,
    /// Back to menu (edge-triggered)
    pub back: bool,
    /// Continue from the summary (edge-triggered)
    pub confirm: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TutorialDrop {
    pub kind: DropKind,
    pub rect: Rect,
    pub velocity_y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tutorial {
    pub phase: TutorialPhase,
    /// Seconds since the current step began
    pub phase_time: f32,
    pub catcher: Rect,
    pub target_zone: Rect,
    pub drop: Option<TutorialDrop>,
    wants_menu: bool,
    wants_play: bool,
}

impl Default for Tutorial {
    fn default() -> Self {
        Self::new()
    }
}

impl Tutorial {
    pub fn new() -> Self {
        Self {
            phase: TutorialPhase::Move,
            phase_time: 0.0,
            catcher: Rect::new(
                SCREEN_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                32.0,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            target_zone: Rect::new(SCREEN_WIDTH * 0.15, 32.0, 120.0, 64.0),
            drop: None,
            wants_menu: false,
            wants_play: false,
        }
    }

    /// Back to the first step (called every time the tutorial is entered)
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Player asked to leave for the menu
    pub fn requests_menu(&self) -> bool {
        self.wants_menu
    }

    /// Player finished and asked to start playing
    pub fn requests_play(&self) -> bool {
        self.wants_play
    }

    pub fn update(&mut self, dt: f32, input: TutorialInput, rng: &mut dyn RandomSource) {
        self.phase_time += dt;

        let step = TUTORIAL_SPEED * dt;
        if input.left {
            self.catcher.pos.x -= step;
        }
        if input.right {
            self.catcher.pos.x += step;
        }
        self.catcher.pos.x = clamp_to_screen(self.catcher.pos.x, self.catcher.width());

        if input.back {
            self.wants_menu = true;
        }

        match self.phase {
            TutorialPhase::Move => {
                let in_zone = self.catcher.overlaps(&self.target_zone)
                    || (self.catcher.x() - self.target_zone.x()).abs() < ZONE_SNAP;
                if in_zone && self.phase_time > MOVE_MIN_TIME {
                    self.advance(TutorialPhase::CatchGood);
                }
            }
            TutorialPhase::CatchGood => {
                if self.drop.is_none() && self.phase_time > DROP_DELAY {
                    let jitter = rng.uniform(-GOOD_DROP_JITTER, GOOD_DROP_JITTER);
                    self.spawn_drop(DropKind::Good, jitter, GOOD_FALL_SPEED);
                }
                self.update_drop(dt);
            }
            TutorialPhase::AvoidBad => {
                if self.drop.is_none() && self.phase_time > DROP_DELAY {
                    self.spawn_drop(DropKind::Bad, 0.0, BAD_FALL_SPEED);
                }
                self.update_drop(dt);
            }
            TutorialPhase::Summary => {
                if input.confirm {
                    self.wants_play = true;
                }
            }
        }
    }

    /// Drop a tutorial drop above the catcher, offset by `jitter`
    fn spawn_drop(&mut self, kind: DropKind, jitter: f32, fall_speed: f32) {
        let center = self.catcher.x() + self.catcher.width() * 0.5 - TUTORIAL_DROP_SIZE * 0.5;
        let x = clamp_to_screen(center + jitter, TUTORIAL_DROP_SIZE);
        self.drop = Some(TutorialDrop {
            kind,
            rect: Rect::new(
                x,
                SCREEN_HEIGHT - TUTORIAL_DROP_SIZE,
                TUTORIAL_DROP_SIZE,
                TUTORIAL_DROP_SIZE,
            ),
            velocity_y: -fall_speed,
        });
    }

    fn update_drop(&mut self, dt: f32) {
        let Some(mut drop) = self.drop else { return };
        drop.rect.pos.y += drop.velocity_y * dt;
        self.drop = Some(drop);

        if drop.rect.overlaps(&self.catcher) {
            match (self.phase, drop.kind) {
                (TutorialPhase::CatchGood, DropKind::Good) => {
                    self.advance(TutorialPhase::AvoidBad)
                }
                // Caught the bad one: try the step again
                (TutorialPhase::AvoidBad, DropKind::Bad) => self.restart_phase(),
                _ => {}
            }
            self.drop = None;
        } else if drop.rect.y() < -TUTORIAL_DROP_SIZE {
            if self.phase == TutorialPhase::AvoidBad && drop.kind == DropKind::Bad {
                self.advance(TutorialPhase::Summary);
            }
            self.drop = None;
        }
    }

    fn restart_phase(&mut self) {
        self.phase_time = 0.0;
        self.drop = None;
    }

    fn advance(&mut self, next: TutorialPhase) {
        log::debug!("Tutorial: {:?} -> {:?}", self.phase, next);
        self.phase_time = 0.0;
        self.drop = None;
        self.phase = next;
    }
}
